#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::return_self_not_must_use)]

//! Core library for packcheck.
//!
//! Models webpack-style bundler configuration records as typed,
//! serde-friendly structures and provides the operations the CLI
//! exposes: loading (`config::load`), structural checks (`check`),
//! record diffing (`diff`), and rule/resolution explanation
//! (`explain`). This crate never runs a build; it only reads and
//! reasons about configuration.

pub mod check;
pub mod config;
pub mod diff;
pub mod error;
pub mod explain;
pub mod version;

pub use check::{CheckReport, Finding, Severity};
pub use config::load::{find_config_file, load_config, load_config_file};
pub use config::{BundlerConfig, Rule, RuleKind, RulePattern, CONFIG_SCHEMA_VERSION};
pub use diff::DiffReport;
pub use error::Error;
pub use explain::Explanation;
pub use version::VERSION;

#[cfg(test)]
pub(crate) mod fixtures {
    //! Shared test fixtures: the two near-duplicate webpack records
    //! the tool was built around.

    /// Library-style build: no dev server port, css-loader only.
    pub const WEB_CONFIG: &str = r#"'use strict';
const path = require('path');

module.exports = {
    devtool: 'inline-source-map',
    entry: './src/index.ts',
    output: {
        path: path.resolve(__dirname, './dist'),
        publicPath: '/dist/',
        filename: 'bundle.js'
    },
    module: {
        rules: [
            {
                test: /\.tsx?$/,
                loader: 'ts-loader',
                exclude: /node_modules/
            },
            {
                test: /\.(png|jpg|gif|svg)$/,
                loader: 'file-loader',
                options: {
                    name: '[name].[ext]?[hash]'
                }
            },
            {
                test: /\.css$/,
                use: ['css-loader']
            }
        ]
    },
    resolve: {
        extensions: ['.ts', '.tsx', '.js', '.json']
    },
    devServer: {
        historyApiFallback: true,
        noInfo: true
    },
    performance: {
        hints: false
    }
};
"#;

    /// App-style build: explicit dev-server port, hot reload, and a
    /// style-loader chain in front of css-loader.
    pub const APP_CONFIG: &str = r#"'use strict';
const path = require('path');

module.exports = {
    devtool: 'inline-source-map',
    entry: './src/main.ts',
    output: {
        path: path.resolve(__dirname, './dist'),
        publicPath: '/dist/',
        filename: 'bundle.js'
    },
    module: {
        rules: [
            {
                test: /\.tsx?$/,
                loader: 'ts-loader',
                exclude: /node_modules/
            },
            {
                test: /\.(png|jpg|gif|svg)$/,
                loader: 'file-loader',
                options: {
                    name: '[name].[ext]?[hash]'
                }
            },
            {
                test: /\.css$/,
                use: ['style-loader', 'css-loader']
            }
        ]
    },
    resolve: {
        extensions: ['.ts', '.tsx', '.js']
    },
    devServer: {
        port: 8080,
        historyApiFallback: true,
        hot: true,
        inline: true
    },
    performance: {
        hints: false
    }
};
"#;
}
