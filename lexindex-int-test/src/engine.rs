use std::collections::BTreeMap;

use lexindex::column::Columns;
use lexindex::errors::{ErrorKind, LexError, LexResult};
use lexindex::field::{Field, FieldValue, SortKey};
use lexindex::mapper::Mapper;
use lexindex::schema::Schema;
use lexindex::search::{NativeQuery, ShapeOperation};
use lexindex::spatial::{haversine_meters, parse_wkt, Geometry};

/// A reference engine that evaluates native query plans in memory.
///
/// Documents are stored as the field lists the schema's write path produces,
/// so every query runs against exactly the representation a real index would
/// hold. Matching is brute force over all documents; this engine checks
/// semantics, not performance.
pub struct MemoryEngine {
    schema: Schema,
    docs: BTreeMap<u64, Vec<Field>>,
}

impl MemoryEngine {
    pub fn new(schema: Schema) -> Self {
        MemoryEngine {
            schema,
            docs: BTreeMap::new(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Validates and indexes one row, replacing any previous document
    /// with the same id.
    pub fn insert(&mut self, doc_id: u64, columns: &Columns) -> LexResult<()> {
        self.schema.validate(columns)?;
        let fields = self.schema.fields(columns)?;
        self.docs.insert(doc_id, fields);
        Ok(())
    }

    pub fn delete(&mut self, doc_id: u64) -> bool {
        self.docs.remove(&doc_id).is_some()
    }

    /// Returns the ids of all matching documents, ascending.
    pub fn search(&self, query: &NativeQuery) -> LexResult<Vec<u64>> {
        let mut hits = Vec::new();
        for (doc_id, fields) in &self.docs {
            if self.matches(fields, query)? {
                hits.push(*doc_id);
            }
        }
        Ok(hits)
    }

    /// Orders `doc_ids` by the sort key of `field`, ascending. Documents
    /// without the field sort last; ties keep the incoming order.
    pub fn sort(&self, field: &str, doc_ids: &[u64]) -> LexResult<Vec<u64>> {
        let mapper = self.schema.mapper(field).ok_or_else(|| {
            LexError::new(
                &format!("no mapper found for field `{}`", field),
                ErrorKind::ConfigError,
            )
        })?;
        let mut keyed: Vec<(Option<SortKey>, u64)> = Vec::with_capacity(doc_ids.len());
        for doc_id in doc_ids {
            let value = self
                .docs
                .get(doc_id)
                .and_then(|fields| fields.iter().find(|f| f.name() == field && f.sorted()));
            let key = match value {
                Some(f) => Some(mapper.sort_key(field, f.value())?),
                None => None,
            };
            keyed.push((key, *doc_id));
        }
        // None sorts after Some; stable sort keeps input order for ties
        keyed.sort_by(|a, b| match (&a.0, &b.0) {
            (Some(x), Some(y)) => x.cmp(y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        Ok(keyed.into_iter().map(|(_, id)| id).collect())
    }

    fn matches(&self, fields: &[Field], query: &NativeQuery) -> LexResult<bool> {
        match query {
            NativeQuery::All => Ok(true),
            NativeQuery::None => Ok(false),
            NativeQuery::Term { field, value } => self.matches_term(fields, field, value),
            NativeQuery::AllTerms { field, values } => {
                for f in indexed(fields, field) {
                    if let Some(text) = f.value().as_str() {
                        let tokens = self.tokens_of(field, text)?;
                        if values.iter().all(|v| tokens.contains(v)) {
                            return Ok(true);
                        }
                    }
                }
                Ok(false)
            }
            NativeQuery::Range {
                field,
                lower,
                upper,
                include_lower,
                include_upper,
            } => {
                for f in indexed(fields, field) {
                    if in_range(f.value(), lower.as_ref(), upper.as_ref(), *include_lower, *include_upper) {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            NativeQuery::Prefix { field, value } => Ok(indexed(fields, field)
                .any(|f| f.value().as_str().is_some_and(|s| s.starts_with(value)))),
            NativeQuery::Wildcard { field, value } => {
                let re = compile_wildcard(value)?;
                Ok(indexed(fields, field)
                    .any(|f| f.value().as_str().is_some_and(|s| re.is_match(s))))
            }
            NativeQuery::Regexp { field, value } => {
                let re = regex::Regex::new(&format!("^(?:{})$", value)).map_err(|e| {
                    LexError::new(&format!("invalid regexp: {}", e), ErrorKind::InternalError)
                })?;
                Ok(indexed(fields, field)
                    .any(|f| f.value().as_str().is_some_and(|s| re.is_match(s))))
            }
            NativeQuery::Fuzzy {
                field,
                value,
                max_edits,
                prefix_length,
                transpositions,
                ..
            } => {
                for f in indexed(fields, field) {
                    if let Some(text) = f.value().as_str() {
                        let terms = if self.is_analyzed(field) {
                            self.tokens_of(field, text)?
                        } else {
                            vec![text.to_string()]
                        };
                        for term in &terms {
                            if fuzzy_match(value, term, *max_edits, *prefix_length, *transpositions)
                            {
                                return Ok(true);
                            }
                        }
                    }
                }
                Ok(false)
            }
            NativeQuery::Phrase { field, terms, slop } => {
                for f in indexed(fields, field) {
                    if let Some(text) = f.value().as_str() {
                        let tokens = self.tokens_of(field, text)?;
                        if phrase_match(&tokens, terms, *slop) {
                            return Ok(true);
                        }
                    }
                }
                Ok(false)
            }
            NativeQuery::Boolean { must, should, not } => {
                // empty boolean matches nothing; not-only acts as a pure
                // exclusion filter over all rows
                if must.is_empty() && should.is_empty() && not.is_empty() {
                    return Ok(false);
                }
                for q in must {
                    if !self.matches(fields, q)? {
                        return Ok(false);
                    }
                }
                for q in not {
                    if self.matches(fields, q)? {
                        return Ok(false);
                    }
                }
                if must.is_empty() && !should.is_empty() {
                    for q in should {
                        if self.matches(fields, q)? {
                            return Ok(true);
                        }
                    }
                    return Ok(false);
                }
                Ok(true)
            }
            NativeQuery::Raw { .. } => Err(LexError::new(
                "raw queries require an engine-native parser",
                ErrorKind::UnsupportedOperation,
            )),
            NativeQuery::Distance {
                field,
                latitude,
                longitude,
                min_meters,
                max_meters,
            } => {
                let lat_name = format!("{}.lat", field);
                let lon_name = format!("{}.lon", field);
                let lat = first_double(fields, &lat_name);
                let lon = first_double(fields, &lon_name);
                match (lat, lon) {
                    (Some(lat), Some(lon)) => {
                        let meters = haversine_meters(*latitude, *longitude, lat, lon);
                        let above_min = min_meters.map_or(true, |min| meters >= min);
                        Ok(above_min && meters <= *max_meters)
                    }
                    _ => Ok(false),
                }
            }
            NativeQuery::Shape {
                field,
                geometry,
                operation,
            } => {
                for f in indexed(fields, field) {
                    if let Some(wkt) = f.value().as_str() {
                        let stored = parse_wkt(wkt)?;
                        if shape_relation(&stored, geometry, *operation) {
                            return Ok(true);
                        }
                    }
                }
                Ok(false)
            }
            NativeQuery::Boost { query, .. } => self.matches(fields, query),
        }
    }

    fn matches_term(&self, fields: &[Field], field: &str, value: &FieldValue) -> LexResult<bool> {
        for f in indexed(fields, field) {
            let hit = match (f.value(), value) {
                (FieldValue::Str(stored), FieldValue::Str(wanted)) => {
                    if self.is_analyzed(field) {
                        self.tokens_of(field, stored)?.contains(wanted)
                    } else {
                        stored == wanted
                    }
                }
                (FieldValue::Long(stored), FieldValue::Long(wanted)) => stored == wanted,
                (stored, wanted) => match (stored.as_double(), wanted.as_double()) {
                    (Some(a), Some(b)) => a == b,
                    _ => false,
                },
            };
            if hit {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn is_analyzed(&self, field: &str) -> bool {
        matches!(self.schema.mapper(field), Some(Mapper::Text(_)))
    }

    fn tokens_of(&self, field: &str, text: &str) -> LexResult<Vec<String>> {
        if self.is_analyzed(field) {
            Ok(self.schema.analyzer_of(field)?.analyze(text))
        } else {
            Ok(vec![text.to_string()])
        }
    }
}

fn indexed<'a>(fields: &'a [Field], name: &'a str) -> impl Iterator<Item = &'a Field> {
    fields.iter().filter(move |f| f.name() == name && f.indexed())
}

fn first_double(fields: &[Field], name: &str) -> Option<f64> {
    fields
        .iter()
        .find(|f| f.name() == name)
        .and_then(|f| f.value().as_double())
}

fn compare(a: &FieldValue, b: &FieldValue) -> Option<std::cmp::Ordering> {
    match (a, b) {
        (FieldValue::Str(x), FieldValue::Str(y)) => Some(x.as_bytes().cmp(y.as_bytes())),
        (FieldValue::Long(x), FieldValue::Long(y)) => Some(x.cmp(y)),
        _ => match (a.as_double(), b.as_double()) {
            (Some(x), Some(y)) => x.partial_cmp(&y),
            _ => None,
        },
    }
}

fn in_range(
    value: &FieldValue,
    lower: Option<&FieldValue>,
    upper: Option<&FieldValue>,
    include_lower: bool,
    include_upper: bool,
) -> bool {
    use std::cmp::Ordering::*;
    if let Some(lower) = lower {
        match compare(value, lower) {
            Some(Greater) => {}
            Some(Equal) if include_lower => {}
            _ => return false,
        }
    }
    if let Some(upper) = upper {
        match compare(value, upper) {
            Some(Less) => {}
            Some(Equal) if include_upper => {}
            _ => return false,
        }
    }
    true
}

fn compile_wildcard(pattern: &str) -> LexResult<regex::Regex> {
    let mut translated = String::with_capacity(pattern.len() + 4);
    translated.push('^');
    for c in pattern.chars() {
        match c {
            '*' => translated.push_str(".*"),
            '?' => translated.push('.'),
            c => translated.push_str(&regex::escape(&c.to_string())),
        }
    }
    translated.push('$');
    regex::Regex::new(&translated).map_err(|e| {
        LexError::new(
            &format!("invalid wildcard pattern: {}", e),
            ErrorKind::InternalError,
        )
    })
}

fn shape_relation(stored: &Geometry, query: &Geometry, operation: ShapeOperation) -> bool {
    match operation {
        ShapeOperation::Intersects => stored.intersects(query),
        ShapeOperation::IsWithin => query.contains(stored),
        ShapeOperation::Contains => stored.contains(query),
    }
}

/// Bounded edit distance; Damerau-Levenshtein when `transpositions` is set,
/// plain Levenshtein otherwise. The shared prefix must match exactly.
fn fuzzy_match(
    query: &str,
    term: &str,
    max_edits: u8,
    prefix_length: u32,
    transpositions: bool,
) -> bool {
    let query: Vec<char> = query.chars().collect();
    let term: Vec<char> = term.chars().collect();
    let prefix = prefix_length as usize;
    if query.len() < prefix || term.len() < prefix || query[..prefix] != term[..prefix] {
        return false;
    }
    let a = &query[prefix..];
    let b = &term[prefix..];
    edit_distance(a, b, transpositions) <= max_edits as usize
}

fn edit_distance(a: &[char], b: &[char], transpositions: bool) -> usize {
    let (n, m) = (a.len(), b.len());
    let mut dist = vec![vec![0usize; m + 1]; n + 1];
    for (i, row) in dist.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=m {
        dist[0][j] = j;
    }
    for i in 1..=n {
        for j in 1..=m {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut d = (dist[i - 1][j] + 1)
                .min(dist[i][j - 1] + 1)
                .min(dist[i - 1][j - 1] + cost);
            if transpositions && i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                d = d.min(dist[i - 2][j - 2] + 1);
            }
            dist[i][j] = d;
        }
    }
    dist[n][m]
}

/// Ordered sloppy phrase match: the tokens must occur in query order, and
/// the total number of extra positions skipped between consecutive tokens
/// must not exceed `slop`.
fn phrase_match(tokens: &[String], terms: &[String], slop: u32) -> bool {
    if terms.is_empty() {
        return false;
    }
    fn step(tokens: &[String], terms: &[String], from: usize, budget: u32) -> bool {
        let Some(term) = terms.first() else {
            return true;
        };
        let limit = (from + budget as usize + 1).min(tokens.len());
        for (offset, token) in tokens[from..limit].iter().enumerate() {
            if token == term {
                let spent = offset as u32;
                if step(tokens, &terms[1..], from + offset + 1, budget - spent) {
                    return true;
                }
            }
        }
        false
    }
    for (start, token) in tokens.iter().enumerate() {
        if token == &terms[0] && step(tokens, &terms[1..], start + 1, slop) {
            return true;
        }
    }
    false
}
