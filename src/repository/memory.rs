use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use mongodb::bson::{Bson, Document};
use regex::RegexBuilder;

use super::store::{DocumentStore, StoreError};

type Collections = HashMap<String, Vec<Document>>;

/// In-memory store evaluating the same BSON predicate language as the
/// MongoDB backend: equality, `$regex` with `$options: "i"`, and `$gte`/
/// `$lte` range operators. Lets the full HTTP surface run under test
/// without a database.
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>, StoreError> {
        self.collections
            .read()
            .map_err(|_| StoreError::Backend("collection lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>, StoreError> {
        self.collections
            .write()
            .map_err(|_| StoreError::Backend("collection lock poisoned".to_string()))
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_one(&self, collection: &str, document: Document) -> Result<(), StoreError> {
        let mut collections = self.write()?;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(())
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.read()?;
        let Some(documents) = collections.get(collection) else {
            return Ok(None);
        };
        for document in documents {
            if matches(document, &filter)? {
                return Ok(Some(document.clone()));
            }
        }
        Ok(None)
    }

    async fn find_many(
        &self,
        collection: &str,
        filter: Document,
        sort: Option<Document>,
        limit: Option<i64>,
    ) -> Result<Vec<Document>, StoreError> {
        let mut results = Vec::new();
        {
            let collections = self.read()?;
            if let Some(documents) = collections.get(collection) {
                for document in documents {
                    if matches(document, &filter)? {
                        results.push(document.clone());
                    }
                }
            }
        }

        if let Some(sort) = &sort {
            sort_documents(&mut results, sort);
        }
        if let Some(limit) = limit {
            if limit >= 0 {
                results.truncate(limit as usize);
            }
        }
        Ok(results)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> Result<u64, StoreError> {
        let mut collections = self.write()?;
        let Some(documents) = collections.get_mut(collection) else {
            return Ok(0);
        };
        for document in documents.iter_mut() {
            if matches(document, &filter)? {
                apply_update(document, &update)?;
                return Ok(1);
            }
        }
        Ok(0)
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64, StoreError> {
        let mut collections = self.write()?;
        let Some(documents) = collections.get_mut(collection) else {
            return Ok(0);
        };
        for index in 0..documents.len() {
            if matches(&documents[index], &filter)? {
                documents.remove(index);
                return Ok(1);
            }
        }
        Ok(0)
    }

    async fn count(&self, collection: &str, filter: Document) -> Result<u64, StoreError> {
        let collections = self.read()?;
        let Some(documents) = collections.get(collection) else {
            return Ok(0);
        };
        let mut count = 0;
        for document in documents {
            if matches(document, &filter)? {
                count += 1;
            }
        }
        Ok(count)
    }

    async fn distinct(
        &self,
        collection: &str,
        field: &str,
        filter: Document,
    ) -> Result<Vec<String>, StoreError> {
        let collections = self.read()?;
        let mut values = BTreeSet::new();
        if let Some(documents) = collections.get(collection) {
            for document in documents {
                if matches(document, &filter)? {
                    if let Ok(value) = document.get_str(field) {
                        values.insert(value.to_string());
                    }
                }
            }
        }
        Ok(values.into_iter().collect())
    }
}

fn matches(document: &Document, filter: &Document) -> Result<bool, StoreError> {
    for (key, condition) in filter {
        let value = document.get(key);
        match condition {
            Bson::Document(operators) if operators.keys().any(|k| k.starts_with('$')) => {
                let case_insensitive = operators
                    .get_str("$options")
                    .map(|options| options.contains('i'))
                    .unwrap_or(false);
                for (operator, operand) in operators {
                    let holds = match operator.as_str() {
                        "$options" => true,
                        "$regex" => regex_matches(value, operand, case_insensitive)?,
                        "$gte" => {
                            compare(value, operand).map_or(false, |ord| ord != Ordering::Less)
                        }
                        "$lte" => {
                            compare(value, operand).map_or(false, |ord| ord != Ordering::Greater)
                        }
                        other => {
                            return Err(StoreError::Backend(format!(
                                "unsupported query operator: {other}"
                            )))
                        }
                    };
                    if !holds {
                        return Ok(false);
                    }
                }
            }
            expected => {
                if !value.map_or(false, |v| bson_eq(v, expected)) {
                    return Ok(false);
                }
            }
        }
    }
    Ok(true)
}

fn regex_matches(
    value: Option<&Bson>,
    pattern: &Bson,
    case_insensitive: bool,
) -> Result<bool, StoreError> {
    let (Some(Bson::String(value)), Bson::String(pattern)) = (value, pattern) else {
        return Ok(false);
    };
    let regex = RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|e| StoreError::Backend(format!("invalid $regex pattern: {e}")))?;
    Ok(regex.is_match(value))
}

fn numeric(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        Bson::Double(v) => Some(*v),
        _ => None,
    }
}

fn bson_eq(a: &Bson, b: &Bson) -> bool {
    match (numeric(a), numeric(b)) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn compare(value: Option<&Bson>, operand: &Bson) -> Option<Ordering> {
    let value = value?;
    if let (Some(x), Some(y)) = (numeric(value), numeric(operand)) {
        return x.partial_cmp(&y);
    }
    match (value, operand) {
        (Bson::String(a), Bson::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn sort_documents(documents: &mut [Document], sort: &Document) {
    let Some((field, direction)) = sort.iter().next() else {
        return;
    };
    let descending = direction.as_i32().map_or(false, |d| d < 0)
        || direction.as_i64().map_or(false, |d| d < 0);
    // Stable sort: equal keys keep insertion order.
    documents.sort_by(|a, b| {
        let ordering = order_key(a.get(field), b.get(field));
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

fn order_key(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => {
            if let (Some(x), Some(y)) = (numeric(a), numeric(b)) {
                return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            }
            match (a, b) {
                (Bson::String(a), Bson::String(b)) => a.cmp(b),
                (Bson::Boolean(a), Bson::Boolean(b)) => a.cmp(b),
                _ => Ordering::Equal,
            }
        }
    }
}

fn apply_update(document: &mut Document, update: &Document) -> Result<(), StoreError> {
    for (operator, fields) in update {
        match (operator.as_str(), fields) {
            ("$set", Bson::Document(fields)) => {
                for (key, value) in fields {
                    document.insert(key.clone(), value.clone());
                }
            }
            _ => {
                return Err(StoreError::Backend(format!(
                    "unsupported update operator: {operator}"
                )))
            }
        }
    }
    Ok(())
}
