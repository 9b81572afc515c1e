use serde::{Deserialize, Serialize};

use crate::condition::{default_boost, is_default_boost, resolve_indexed};
use crate::errors::{ErrorKind, LexError, LexResult};
use crate::mapper::Mapper;
use crate::schema::Schema;
use crate::search::NativeQuery;

pub const DEFAULT_MAX_EDITS: u8 = 2;
pub const DEFAULT_MAX_EXPANSIONS: u32 = 50;

fn default_max_edits() -> u8 {
    DEFAULT_MAX_EDITS
}

fn default_max_expansions() -> u32 {
    DEFAULT_MAX_EXPANSIONS
}

fn default_transpositions() -> bool {
    true
}

/// Matches terms starting with a literal prefix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrefixCondition {
    pub field: String,
    pub value: String,
    #[serde(default = "default_boost", skip_serializing_if = "is_default_boost")]
    pub boost: f32,
}

impl PrefixCondition {
    pub(crate) fn compile(&self, schema: &Schema) -> LexResult<NativeQuery> {
        resolve_indexed(schema, &self.field)?;
        Ok(NativeQuery::Prefix {
            field: self.field.clone(),
            value: self.value.clone(),
        })
    }
}

/// Matches terms against a glob with `*` and `?` metacharacters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WildcardCondition {
    pub field: String,
    pub value: String,
    #[serde(default = "default_boost", skip_serializing_if = "is_default_boost")]
    pub boost: f32,
}

impl WildcardCondition {
    pub(crate) fn compile(&self, schema: &Schema) -> LexResult<NativeQuery> {
        resolve_indexed(schema, &self.field)?;
        Ok(NativeQuery::Wildcard {
            field: self.field.clone(),
            value: self.value.clone(),
        })
    }
}

/// Matches terms against a regular expression, validated at compile time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegexpCondition {
    pub field: String,
    pub value: String,
    #[serde(default = "default_boost", skip_serializing_if = "is_default_boost")]
    pub boost: f32,
}

impl RegexpCondition {
    pub(crate) fn compile(&self, schema: &Schema) -> LexResult<NativeQuery> {
        resolve_indexed(schema, &self.field)?;
        regex::Regex::new(&self.value).map_err(|e| {
            LexError::new(
                &format!("Invalid regular expression `{}`: {}", self.value, e),
                ErrorKind::ConfigError,
            )
        })?;
        Ok(NativeQuery::Regexp {
            field: self.field.clone(),
            value: self.value.clone(),
        })
    }
}

/// Matches terms within a bounded edit distance of a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyCondition {
    pub field: String,
    pub value: String,
    #[serde(default = "default_max_edits")]
    pub max_edits: u8,
    #[serde(default)]
    pub prefix_length: u32,
    #[serde(default = "default_max_expansions")]
    pub max_expansions: u32,
    #[serde(default = "default_transpositions")]
    pub transpositions: bool,
    #[serde(default = "default_boost", skip_serializing_if = "is_default_boost")]
    pub boost: f32,
}

impl FuzzyCondition {
    pub(crate) fn compile(&self, schema: &Schema) -> LexResult<NativeQuery> {
        resolve_indexed(schema, &self.field)?;
        if self.max_edits > 2 {
            return Err(LexError::new(
                &format!("max_edits must be at most 2, got {}", self.max_edits),
                ErrorKind::ConfigError,
            ));
        }
        if self.max_expansions == 0 {
            return Err(LexError::new(
                "max_expansions must be positive",
                ErrorKind::ConfigError,
            ));
        }
        Ok(NativeQuery::Fuzzy {
            field: self.field.clone(),
            value: self.value.clone(),
            max_edits: self.max_edits,
            prefix_length: self.prefix_length,
            max_expansions: self.max_expansions,
            transpositions: self.transpositions,
        })
    }
}

/// Matches an ordered token sequence on an analyzed text field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhraseCondition {
    pub field: String,
    pub values: Vec<String>,
    #[serde(default)]
    pub slop: u32,
    #[serde(default = "default_boost", skip_serializing_if = "is_default_boost")]
    pub boost: f32,
}

impl PhraseCondition {
    pub(crate) fn compile(&self, schema: &Schema) -> LexResult<NativeQuery> {
        let mapper = resolve_indexed(schema, &self.field)?;
        if !matches!(mapper, Mapper::Text(_)) {
            return Err(LexError::new(
                &format!(
                    "Field `{}`: phrase conditions need a text mapper, found {}",
                    self.field,
                    mapper.type_name()
                ),
                ErrorKind::UnsupportedOperation,
            ));
        }
        let analyzer = schema.analyzer_of(&self.field)?;
        let terms: Vec<String> = self
            .values
            .iter()
            .flat_map(|v| analyzer.analyze(v))
            .collect();
        Ok(NativeQuery::Phrase {
            field: self.field.clone(),
            terms,
            slop: self.slop,
        })
    }
}
