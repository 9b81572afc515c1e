use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::analysis::{analyzer, Analyzer, DEFAULT_ANALYZER};
use crate::column::{Columns, HostType};
use crate::errors::{ErrorKind, LexError, LexResult};
use crate::field::Field;
use crate::mapper::Mapper;
use crate::schema::config::MapperConfig;

/// The JSON document a schema is declared as: an optional default analyzer
/// plus one mapper declaration per field, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SchemaConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_analyzer: Option<String>,
    #[serde(default)]
    pub fields: IndexMap<String, MapperConfig>,
}

impl SchemaConfig {
    pub fn from_json(json: &str) -> LexResult<SchemaConfig> {
        serde_json::from_str(json).map_err(|e| {
            LexError::new_with_cause(
                "Invalid schema document",
                ErrorKind::ParseError,
                e.into(),
            )
        })
    }

    pub fn to_json(&self) -> LexResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Builds the immutable runtime schema, validating every mapper's
    /// options and analyzer references.
    pub fn build(&self) -> LexResult<Schema> {
        if let Some(name) = &self.default_analyzer {
            analyzer(name)?;
        }
        let mut mappers = IndexMap::with_capacity(self.fields.len());
        for (name, config) in &self.fields {
            let mapper = config.build().map_err(|e| {
                LexError::new_with_cause(
                    &format!("Invalid mapper for field `{}`", name),
                    ErrorKind::ConfigError,
                    e,
                )
            })?;
            if let Some(analyzer_name) = mapper.analyzer() {
                analyzer(analyzer_name)?;
            }
            mappers.insert(name.clone(), mapper);
        }
        Ok(Schema {
            default_analyzer: self.default_analyzer.clone(),
            mappers,
        })
    }
}

/// The validated, immutable mapper registry for one index.
///
/// Built once from a [SchemaConfig]; afterwards only read, so sharing a
/// schema across threads needs no synchronization.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    default_analyzer: Option<String>,
    mappers: IndexMap<String, Mapper>,
}

impl Schema {
    /// Parses and builds a schema in one step.
    pub fn from_json(json: &str) -> LexResult<Schema> {
        SchemaConfig::from_json(json)?.build()
    }

    /// The mapper declared for a field. An unmapped field is not an error.
    pub fn mapper(&self, field: &str) -> Option<&Mapper> {
        // dotted lookups resolve to the declaring mapper: `place.lat`
        // belongs to the `place` geo_point mapper
        self.mappers.get(field).or_else(|| {
            field
                .rsplit_once('.')
                .and_then(|(head, _)| self.mappers.get(head))
        })
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.mappers.keys().map(String::as_str)
    }

    pub fn mappers(&self) -> impl Iterator<Item = (&str, &Mapper)> {
        self.mappers.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn default_analyzer(&self) -> &str {
        self.default_analyzer.as_deref().unwrap_or(DEFAULT_ANALYZER)
    }

    /// The analyzer a text field is searched with: the mapper's own if
    /// declared, otherwise the schema default.
    pub fn analyzer_of(&self, field: &str) -> LexResult<Analyzer> {
        let name = self
            .mapper(field)
            .and_then(|m| m.analyzer())
            .unwrap_or_else(|| self.default_analyzer());
        analyzer(name)
    }

    /// Whether the named field accepts columns of the given host type.
    pub fn supports(&self, field: &str, host_type: &HostType) -> bool {
        match self.mapper(field) {
            Some(mapper) => mapper.supports(host_type),
            None => false,
        }
    }

    /// The write path: every indexable field the mappers derive from one
    /// row's columns.
    pub fn fields(&self, columns: &Columns) -> LexResult<Vec<Field>> {
        let mut fields = Vec::new();
        for (name, mapper) in &self.mappers {
            fields.extend(mapper.fields(name, columns)?);
        }
        Ok(fields)
    }

    /// Checks every mapped column's host type against its mapper before a
    /// write is accepted.
    pub fn validate(&self, columns: &Columns) -> LexResult<()> {
        for column in columns {
            let mapper = match self.mappers.get(column.name()) {
                Some(m) => m,
                None => continue,
            };
            // multi-column mappers read source columns under their own
            // names; those are checked here instead
            if matches!(mapper, Mapper::GeoPoint(_) | Mapper::Bitemporal(_)) {
                continue;
            }
            if !mapper.supports(column.host_type()) {
                return Err(LexError::new(
                    &format!(
                        "Field `{}`: {} mapper does not support host type {}",
                        column.name(),
                        mapper.type_name(),
                        column.host_type()
                    ),
                    ErrorKind::UnsupportedType,
                ));
            }
        }
        for mapper in self.mappers.values() {
            let sources: Vec<&str> = match mapper {
                Mapper::GeoPoint(m) => vec![m.latitude_column(), m.longitude_column()],
                Mapper::Bitemporal(m) => {
                    vec![&m.vt_from, &m.vt_to, &m.tt_from, &m.tt_to]
                }
                _ => continue,
            };
            for source in sources {
                if let Some(column) = columns.first(source) {
                    if !mapper.supports(column.host_type()) {
                        return Err(LexError::new(
                            &format!(
                                "Column `{}`: {} mapper does not support host type {}",
                                source,
                                mapper.type_name(),
                                column.host_type()
                            ),
                            ErrorKind::UnsupportedType,
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}
