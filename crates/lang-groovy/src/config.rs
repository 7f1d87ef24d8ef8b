//! Engine options: active Groovy version, extra imports and script naming.

use crate::ast::ImportDecl;
use crate::error::{GroovyError, Result};
use groovyscope_api::Span;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A `major.minor` Groovy release. Gates the lookup chain and extension tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroovyVersion {
    pub major: u32,
    pub minor: u32,
}

impl GroovyVersion {
    pub const V1_7: GroovyVersion = GroovyVersion::new(1, 7);
    pub const V1_8: GroovyVersion = GroovyVersion::new(1, 8);
    pub const V2_0: GroovyVersion = GroovyVersion::new(2, 0);
    pub const V2_1: GroovyVersion = GroovyVersion::new(2, 1);
    pub const V2_3: GroovyVersion = GroovyVersion::new(2, 3);
    pub const V2_4: GroovyVersion = GroovyVersion::new(2, 4);
    pub const V2_5: GroovyVersion = GroovyVersion::new(2, 5);

    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Static type checking results exist from 2.0 onwards.
    pub fn has_static_type_checking(self) -> bool {
        self >= Self::V2_0
    }
}

impl Default for GroovyVersion {
    fn default() -> Self {
        Self::V2_4
    }
}

impl fmt::Display for GroovyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for GroovyVersion {
    type Err = GroovyError;

    /// Accepts `2`, `2.4` and full releases such as `2.4.12`.
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.trim().split('.');
        let parse = |part: Option<&str>| -> Result<u32> {
            match part {
                None => Ok(0),
                Some(p) => p
                    .parse::<u32>()
                    .map_err(|_| GroovyError::InvalidVersion(s.to_string())),
            }
        };
        let major = match parts.next() {
            Some(p) if !p.is_empty() => parse(Some(p))?,
            _ => return Err(GroovyError::InvalidVersion(s.to_string())),
        };
        let minor = parse(parts.next())?;
        Ok(Self::new(major, minor))
    }
}

impl Serialize for GroovyVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GroovyVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Options shared by every unit analysed with one engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceOptions {
    pub groovy_version: GroovyVersion,
    /// Extra imports in the `a.b.*,a.b.Type as Alias;.gradle=c.d.*` format.
    pub extra_imports: String,
    /// Class name given to snippets analysed without a file name.
    pub script_name: String,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            groovy_version: GroovyVersion::default(),
            extra_imports: String::new(),
            script_name: "Script".to_string(),
        }
    }
}

impl InferenceOptions {
    pub fn with_version(mut self, version: GroovyVersion) -> Self {
        self.groovy_version = version;
        self
    }

    pub fn with_extra_imports(mut self, extra_imports: impl Into<String>) -> Self {
        self.extra_imports = extra_imports.into();
        self
    }

    pub fn with_script_name(mut self, name: impl Into<String>) -> Self {
        self.script_name = name.into();
        self
    }
}

/// Parsed extra imports: one global group plus groups restricted to a file suffix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtraImports {
    global: Vec<ImportDecl>,
    by_suffix: Vec<(String, Vec<ImportDecl>)>,
}

impl ExtraImports {
    /// Parses `a.b.*,a.b.Type as Alias;.gradle=c.d.*`.
    ///
    /// Groups are separated by `;`. A group of the form `.suffix=...` only
    /// applies to files whose name ends with `.suffix`.
    pub fn parse(spec: &str) -> Result<Self> {
        let mut extra = ExtraImports::default();
        for group in spec.split(';').map(str::trim).filter(|g| !g.is_empty()) {
            match group.split_once('=') {
                Some((suffix, imports)) => {
                    let suffix = suffix.trim();
                    if !suffix.starts_with('.') || suffix.len() < 2 {
                        return Err(GroovyError::InvalidImport(group.to_string()));
                    }
                    extra
                        .by_suffix
                        .push((suffix.to_string(), parse_import_list(imports)?));
                }
                None => extra.global.extend(parse_import_list(group)?),
            }
        }
        Ok(extra)
    }

    /// Imports that apply to a file with the given name.
    pub fn for_file(&self, file_name: &str) -> Vec<ImportDecl> {
        let mut imports = self.global.clone();
        for (suffix, group) in &self.by_suffix {
            if file_name.ends_with(suffix.as_str()) {
                imports.extend(group.iter().cloned());
            }
        }
        imports
    }

    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.by_suffix.is_empty()
    }
}

fn parse_import_list(list: &str) -> Result<Vec<ImportDecl>> {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(parse_import_entry)
        .collect()
}

fn parse_import_entry(entry: &str) -> Result<ImportDecl> {
    let invalid = || GroovyError::InvalidImport(entry.to_string());
    let (path, alias) = match entry.split_once(" as ") {
        Some((path, alias)) => {
            let alias = alias.trim();
            if alias.is_empty() || alias.contains('.') {
                return Err(invalid());
            }
            (path.trim(), Some(alias.to_string()))
        }
        None => (entry, None),
    };
    let (path, star) = match path.strip_suffix(".*") {
        Some(prefix) => (prefix, true),
        None => (path, false),
    };
    let valid_segment = |s: &str| {
        !s.is_empty()
            && s.chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '$')
    };
    if !path.split('.').all(valid_segment) || (star && alias.is_some()) {
        return Err(invalid());
    }
    Ok(ImportDecl {
        path: path.to_string(),
        star,
        alias,
        is_static: false,
        span: Span::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_versions() {
        assert_eq!("2.4.12".parse::<GroovyVersion>().unwrap(), GroovyVersion::V2_4);
        assert_eq!("3".parse::<GroovyVersion>().unwrap(), GroovyVersion::new(3, 0));
        assert!("x.1".parse::<GroovyVersion>().is_err());
        assert!(GroovyVersion::V1_8 < GroovyVersion::V2_0);
    }

    #[test]
    fn versions_serialize_as_strings() {
        let options = InferenceOptions::default().with_version(GroovyVersion::V1_8);
        let json = serde_json::to_string(&options).unwrap();
        assert!(json.contains("\"groovy_version\":\"1.8\""));
        let back: InferenceOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }

    #[test]
    fn partial_config_uses_defaults() {
        let options: InferenceOptions = serde_json::from_str(r#"{"script_name":"Search"}"#).unwrap();
        assert_eq!(options.script_name, "Search");
        assert_eq!(options.groovy_version, GroovyVersion::V2_4);
    }

    #[test]
    fn extra_imports_apply_by_suffix() {
        let extra =
            ExtraImports::parse("java.util.concurrent.*,java.sql.Date as SqlDate;.gradle=org.gradle.api.*")
                .unwrap();
        let plain = extra.for_file("Build.groovy");
        assert_eq!(plain.len(), 2);
        assert!(plain[0].star);
        assert_eq!(plain[1].alias.as_deref(), Some("SqlDate"));

        let gradle = extra.for_file("build.gradle");
        assert_eq!(gradle.len(), 3);
        assert_eq!(gradle[2].path, "org.gradle.api");
    }

    #[test]
    fn rejects_malformed_extra_imports() {
        assert!(ExtraImports::parse("a..b").is_err());
        assert!(ExtraImports::parse("a.b.* as X").is_err());
        assert!(ExtraImports::parse("gradle=a.b.*").is_err());
    }
}
