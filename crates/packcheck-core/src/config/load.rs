//! Configuration file discovery and parsing.
//!
//! Loads `webpack.config.js` (and its dev/prod siblings) and extracts
//! the exported configuration record. The exported object is located
//! after `module.exports =` or `export default`, then parsed with a
//! JSON5-like object-literal parser extended for the constructs these
//! files actually contain: regex literals (`/\.tsx?$/`), single
//! quotes, unquoted keys, trailing commas, and `path.resolve(...)` /
//! `path.join(...)` calls with `__dirname`.
//!
//! ## Supported config shape
//!
//! ```js
//! module.exports = {
//!   entry: './src/index.ts',
//!   output: { path: path.resolve(__dirname, './dist'), filename: 'bundle.js' },
//!   module: { rules: [{ test: /\.tsx?$/, loader: 'ts-loader' }] },
//! };
//! ```

use std::path::{Path, PathBuf};

use crate::config::BundlerConfig;
use crate::error::Error;

/// Config file names in priority order.
pub const CONFIG_FILES: &[&str] = &[
    "webpack.config.js",
    "webpack.config.dev.js",
    "webpack.config.prod.js",
    "webpack.config.ts",
];

/// Find a config file in the given root directory.
#[must_use]
pub fn find_config_file(root: &Path) -> Option<PathBuf> {
    for name in CONFIG_FILES {
        let path = root.join(name);
        if path.exists() {
            return Some(path);
        }
    }
    None
}

/// Load a configuration record from a root directory.
///
/// If `config_path` is `Some`, use that specific file. Otherwise,
/// auto-discover; `Ok(None)` means no config file exists in `root`.
pub fn load_config(
    root: &Path,
    config_path: Option<&Path>,
) -> Result<Option<(PathBuf, BundlerConfig)>, Error> {
    let path = match config_path {
        Some(p) => {
            let abs = if p.is_absolute() {
                p.to_path_buf()
            } else {
                root.join(p)
            };
            if !abs.exists() {
                return Err(Error::ConfigRead {
                    path: abs,
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                });
            }
            abs
        }
        None => match find_config_file(root) {
            Some(p) => p,
            None => return Ok(None),
        },
    };

    let config = load_config_file(&path)?;
    Ok(Some((path, config)))
}

/// Load a configuration record from an explicit file path.
pub fn load_config_file(path: &Path) -> Result<BundlerConfig, Error> {
    let source = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let value = parse_exported_value(&source).map_err(|message| Error::ConfigParse {
        path: path.to_path_buf(),
        message,
    })?;

    serde_json::from_value(value).map_err(|e| Error::ConfigShape {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Parse a configuration record from config-file source text.
pub fn parse_config_source(source: &str) -> Result<BundlerConfig, Error> {
    let value = parse_exported_value(source).map_err(Error::other)?;
    serde_json::from_value(value)
        .map_err(|e| Error::other(format!("config does not match the record shape: {e}")))
}

/// Extract and parse the exported object, producing a raw value tree.
fn parse_exported_value(source: &str) -> Result<serde_json::Value, String> {
    let obj_str = extract_exported_object(source).ok_or_else(|| {
        "No `module.exports = { ... }` or `export default { ... }` found in config file"
            .to_string()
    })?;

    let mut parser = JsObjectParser::new(&obj_str);
    parser.parse_value()
}

/// Extract the object literal from `module.exports = { ... }` or
/// `export default { ... }`.
///
/// Returns the object including the outer braces.
fn extract_exported_object(source: &str) -> Option<String> {
    // Strip comments first so markers inside comments don't match.
    let stripped = strip_comments(source);

    let after_marker = if let Some(idx) = stripped.find("module.exports") {
        let rest = stripped[idx + "module.exports".len()..].trim_start();
        rest.strip_prefix('=')?.trim_start().to_string()
    } else if let Some(idx) = stripped.find("export default") {
        stripped[idx + "export default".len()..]
            .trim_start()
            .to_string()
    } else {
        return None;
    };

    if !after_marker.starts_with('{') {
        return None;
    }

    // Find matching closing brace, respecting nesting, strings, and
    // regex literals (a class like `[{]` must not disturb the depth).
    let chars: Vec<char> = after_marker.chars().collect();
    let mut depth = 0;
    let mut in_string: Option<char> = None;
    let mut last_sig = '\0';
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];

        if let Some(quote) = in_string {
            if ch == '\\' {
                i += 2;
                continue;
            }
            if ch == quote {
                in_string = None;
            }
            i += 1;
            continue;
        }

        match ch {
            '"' | '\'' | '`' => in_string = Some(ch),
            '/' if regex_follows(last_sig) => {
                i = skip_regex(&chars, i);
                last_sig = '/';
                continue;
            }
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(chars[..=i].iter().collect());
                }
            }
            _ => {}
        }

        if !ch.is_whitespace() {
            last_sig = ch;
        }
        i += 1;
    }

    None
}

/// Whether a `/` here opens a regex literal rather than division:
/// true when the previous significant character leaves the scanner in
/// value position.
fn regex_follows(last_sig: char) -> bool {
    matches!(
        last_sig,
        '\0' | ':' | ',' | '(' | '[' | '{' | '=' | ';' | '!' | '&' | '|' | '?'
    )
}

/// Scan past a regex literal starting at its opening `/`.
///
/// Returns the index just past the closing `/` and any trailing
/// flags. Escapes (`\/`) and character classes (`[/]`) do not
/// terminate the literal; an unterminated literal ends at the line
/// break and is left for the parser to reject.
fn skip_regex(chars: &[char], start: usize) -> usize {
    let mut i = start + 1;
    let mut in_class = false;

    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            '[' => {
                in_class = true;
                i += 1;
            }
            ']' => {
                in_class = false;
                i += 1;
            }
            '/' if !in_class => {
                i += 1;
                break;
            }
            '\n' => return i,
            _ => i += 1,
        }
    }

    while i < chars.len() && chars[i].is_ascii_alphabetic() {
        i += 1;
    }
    i
}

/// Strip single-line (//) and multi-line (/* */) comments from JS source.
///
/// Regex literals are copied through verbatim: a pattern ending in an
/// escaped slash (`/node_modules\//`) would otherwise put `//` next to
/// each other and be eaten as a line comment. `//` itself is always a
/// comment in JS (an empty regex is spelled `/(?:)/`), so the comment
/// checks run first.
fn strip_comments(source: &str) -> String {
    let mut result = String::with_capacity(source.len());
    let chars: Vec<char> = source.chars().collect();
    let len = chars.len();
    let mut i = 0;
    let mut in_string: Option<char> = None;
    let mut last_sig = '\0';

    while i < len {
        if let Some(quote) = in_string {
            result.push(chars[i]);
            if chars[i] == quote && (i == 0 || chars[i - 1] != '\\') {
                in_string = None;
            }
            i += 1;
        } else if i + 1 < len && chars[i] == '/' && chars[i + 1] == '/' {
            // Single-line comment: skip to end of line
            while i < len && chars[i] != '\n' {
                i += 1;
            }
        } else if i + 1 < len && chars[i] == '/' && chars[i + 1] == '*' {
            // Multi-line comment: skip to */
            i += 2;
            while i + 1 < len && !(chars[i] == '*' && chars[i + 1] == '/') {
                // Preserve newlines for line structure
                if chars[i] == '\n' {
                    result.push('\n');
                }
                i += 1;
            }
            i += 2; // skip */
        } else if chars[i] == '/' && regex_follows(last_sig) {
            let end = skip_regex(&chars, i);
            for &c in &chars[i..end] {
                result.push(c);
            }
            last_sig = '/';
            i = end;
        } else {
            if chars[i] == '"' || chars[i] == '\'' || chars[i] == '`' {
                in_string = Some(chars[i]);
            }
            if !chars[i].is_whitespace() {
                last_sig = chars[i];
            }
            result.push(chars[i]);
            i += 1;
        }
    }

    result
}

/// Parser for JS object literals as found in bundler config files.
///
/// Handles: unquoted keys, single/double/backtick strings, trailing
/// commas, nested objects, arrays, numbers, booleans, null, regex
/// literals, `__dirname`, and `path.resolve`/`path.join` calls.
///
/// Regex literals are encoded in the value tree as `/source/flags`
/// strings; the typed model re-parses them where a pattern is
/// expected, so plain strings that merely look slashed (like a
/// `publicPath` of `/dist/`) are never misread.
struct JsObjectParser {
    chars: Vec<char>,
    pos: usize,
}

impl JsObjectParser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.get(self.pos).copied();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn parse_value(&mut self) -> Result<serde_json::Value, String> {
        self.skip_whitespace();
        match self.peek() {
            Some('{') => self.parse_object(),
            Some('[') => self.parse_array(),
            Some('"') | Some('\'') | Some('`') => self.parse_string(),
            Some('/') => self.parse_regex(),
            Some(ch) if ch == '-' || ch.is_ascii_digit() => self.parse_number(),
            Some(ch) if ch.is_alphabetic() || ch == '_' || ch == '$' => self.parse_identifier(),
            Some(ch) => Err(format!(
                "Unexpected character '{}' at position {}",
                ch, self.pos
            )),
            None => Err("Unexpected end of input".to_string()),
        }
    }

    fn parse_object(&mut self) -> Result<serde_json::Value, String> {
        self.advance(); // skip '{'
        let mut map = serde_json::Map::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('}') => {
                    self.advance();
                    return Ok(serde_json::Value::Object(map));
                }
                None => return Err("Unterminated object".to_string()),
                _ => {}
            }

            // Parse key: quoted string or bare identifier
            let key = self.parse_key()?;
            self.skip_whitespace();

            // Expect ':'
            match self.advance() {
                Some(':') => {}
                other => return Err(format!("Expected ':' after key, got {:?}", other)),
            }

            // Parse value
            let value = self.parse_value()?;
            map.insert(key, value);

            // Expect ',' or '}'
            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.advance();
                }
                Some('}') => {} // will be handled at top of loop
                None => return Err("Unterminated object".to_string()),
                Some(ch) => return Err(format!("Expected ',' or '}}' in object, got '{}'", ch)),
            }
        }
    }

    fn parse_array(&mut self) -> Result<serde_json::Value, String> {
        self.advance(); // skip '['
        let mut arr = Vec::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(']') => {
                    self.advance();
                    return Ok(serde_json::Value::Array(arr));
                }
                None => return Err("Unterminated array".to_string()),
                _ => {}
            }

            let value = self.parse_value()?;
            arr.push(value);

            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.advance();
                }
                Some(']') => {} // will be handled at top of loop
                None => return Err("Unterminated array".to_string()),
                Some(ch) => return Err(format!("Expected ',' or ']' in array, got '{}'", ch)),
            }
        }
    }

    fn parse_key(&mut self) -> Result<String, String> {
        self.skip_whitespace();
        match self.peek() {
            Some('"') | Some('\'') => {
                if let serde_json::Value::String(s) = self.parse_string()? {
                    Ok(s)
                } else {
                    Err("Expected string key".to_string())
                }
            }
            Some(ch) if ch.is_alphabetic() || ch == '_' || ch == '$' || ch == '.' => {
                // Bare identifier key (may contain dots for keys like 'process.env.NODE_ENV')
                let mut key = String::new();
                while let Some(ch) = self.peek() {
                    if ch.is_alphanumeric() || ch == '_' || ch == '$' || ch == '.' {
                        key.push(ch);
                        self.advance();
                    } else {
                        break;
                    }
                }
                Ok(key)
            }
            other => Err(format!("Expected object key, got {:?}", other)),
        }
    }

    fn parse_string(&mut self) -> Result<serde_json::Value, String> {
        let quote = self.advance().ok_or("Unexpected end of input")?;
        let mut s = String::new();

        loop {
            match self.advance() {
                Some(ch) if ch == quote => {
                    return Ok(serde_json::Value::String(s));
                }
                Some('\\') => {
                    match self.advance() {
                        Some('n') => s.push('\n'),
                        Some('t') => s.push('\t'),
                        Some('r') => s.push('\r'),
                        Some('\\') => s.push('\\'),
                        Some(ch) if ch == quote => s.push(ch),
                        Some(ch) => {
                            s.push('\\');
                            s.push(ch);
                        }
                        None => return Err("Unterminated string escape".to_string()),
                    }
                }
                Some(ch) => s.push(ch),
                None => return Err("Unterminated string".to_string()),
            }
        }
    }

    /// Parse a regex literal like `/\.tsx?$/i` into its `/source/flags`
    /// string form.
    fn parse_regex(&mut self) -> Result<serde_json::Value, String> {
        self.advance(); // skip opening '/'
        let mut body = String::new();
        let mut in_class = false;

        loop {
            match self.advance() {
                Some('\\') => {
                    body.push('\\');
                    match self.advance() {
                        Some(ch) => body.push(ch),
                        None => return Err("Unterminated regex escape".to_string()),
                    }
                }
                Some('[') => {
                    in_class = true;
                    body.push('[');
                }
                Some(']') => {
                    in_class = false;
                    body.push(']');
                }
                Some('/') if !in_class => break,
                Some('\n') | None => return Err("Unterminated regex literal".to_string()),
                Some(ch) => body.push(ch),
            }
        }

        let mut flags = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphabetic() {
                flags.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Ok(serde_json::Value::String(format!("/{body}/{flags}")))
    }

    fn parse_number(&mut self) -> Result<serde_json::Value, String> {
        let mut num_str = String::new();
        let mut has_dot = false;

        if self.peek() == Some('-') {
            num_str.push('-');
            self.advance();
        }

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                num_str.push(ch);
                self.advance();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                num_str.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if has_dot {
            let n: f64 = num_str
                .parse()
                .map_err(|e| format!("Invalid number '{}': {}", num_str, e))?;
            serde_json::Number::from_f64(n)
                .map(serde_json::Value::Number)
                .ok_or_else(|| format!("Non-finite number '{num_str}'"))
        } else {
            num_str
                .parse::<i64>()
                .map(|n| serde_json::Value::Number(n.into()))
                .map_err(|e| format!("Invalid number '{}': {}", num_str, e))
        }
    }

    /// Parse an identifier value: `true`/`false`/`null`/`undefined`,
    /// `__dirname`, or a call expression like `path.resolve(...)`.
    fn parse_identifier(&mut self) -> Result<serde_json::Value, String> {
        let mut ident = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' || ch == '$' || ch == '.' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match ident.as_str() {
            "true" => return Ok(serde_json::Value::Bool(true)),
            "false" => return Ok(serde_json::Value::Bool(false)),
            "null" | "undefined" => return Ok(serde_json::Value::Null),
            // Resolved relative to the config file's own directory.
            "__dirname" => return Ok(serde_json::Value::String(".".to_string())),
            _ => {}
        }

        self.skip_whitespace();
        if self.peek() == Some('(') {
            let args = self.parse_call_args()?;
            return evaluate_call(&ident, &args);
        }

        Err(format!("Unsupported identifier '{ident}'"))
    }

    fn parse_call_args(&mut self) -> Result<Vec<serde_json::Value>, String> {
        self.advance(); // skip '('
        let mut args = Vec::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(')') => {
                    self.advance();
                    return Ok(args);
                }
                None => return Err("Unterminated call expression".to_string()),
                _ => {}
            }

            args.push(self.parse_value()?);

            self.skip_whitespace();
            match self.peek() {
                Some(',') => {
                    self.advance();
                }
                Some(')') => {}
                None => return Err("Unterminated call expression".to_string()),
                Some(ch) => return Err(format!("Expected ',' or ')' in call, got '{}'", ch)),
            }
        }
    }

}

/// Evaluate the small set of call expressions config files use.
///
/// `path.resolve` and `path.join` are folded into a relative path
/// string, with `__dirname` standing in for the config directory.
fn evaluate_call(ident: &str, args: &[serde_json::Value]) -> Result<serde_json::Value, String> {
    match ident {
        "path.resolve" | "path.join" => {
            let mut parts: Vec<&str> = Vec::new();
            for arg in args {
                match arg {
                    serde_json::Value::String(s) if s == "." => {}
                    serde_json::Value::String(s) => parts.push(s),
                    other => {
                        return Err(format!("{ident}: expected string argument, got {other}"))
                    }
                }
            }
            if parts.is_empty() {
                return Ok(serde_json::Value::String(".".to_string()));
            }
            let joined = parts.join("/");
            let normalized = if joined.starts_with('/') || joined.starts_with('.') {
                joined
            } else {
                format!("./{joined}")
            };
            Ok(serde_json::Value::String(normalized))
        }
        _ => Err(format!("Unsupported call '{ident}(...)'")),
    }
}
