//! Translation of the article query model into the Elasticsearch query DSL.

use crate::domain::article::{BoolQuery, Clause, HighlightSpec, SearchRequest, SearchValue};
use serde_json::{Map, Value, json};

fn value_json(value: &SearchValue) -> Value {
    match value {
        SearchValue::Integer(v) => json!(v),
        SearchValue::Keyword(v) => json!(v),
        SearchValue::Timestamp(v) => json!(v.to_rfc3339()),
    }
}

fn clause_json(clause: &Clause) -> Value {
    match clause {
        Clause::Match { field, text } => json!({ "match": { field.as_str(): text } }),
        Clause::MatchPhrase { field, text } => {
            json!({ "match_phrase": { field.as_str(): text } })
        }
        Clause::MultiMatch {
            fields,
            text,
            phrase,
        } => {
            let fields: Vec<&str> = fields.iter().map(|f| f.as_str()).collect();
            let kind = if *phrase { "phrase" } else { "best_fields" };
            json!({ "multi_match": { "query": text, "fields": fields, "type": kind } })
        }
        Clause::Term { field, value } => json!({ "term": { field.as_str(): value_json(value) } }),
        Clause::Terms { field, values } => {
            let values: Vec<Value> = values.iter().map(value_json).collect();
            json!({ "terms": { field.as_str(): values } })
        }
        Clause::Range { field, gte, lt } => {
            let mut bounds = Map::new();
            if let Some(gte) = gte {
                bounds.insert("gte".into(), value_json(gte));
            }
            if let Some(lt) = lt {
                bounds.insert("lt".into(), value_json(lt));
            }
            json!({ "range": { field.as_str(): bounds } })
        }
    }
}

pub(super) fn bool_json(query: &BoolQuery) -> Value {
    if query.is_empty() {
        return json!({ "match_all": {} });
    }

    let mut body = Map::new();
    for (key, clauses) in [
        ("must", &query.must),
        ("should", &query.should),
        ("filter", &query.filter),
    ] {
        if !clauses.is_empty() {
            body.insert(key.into(), clauses.iter().map(clause_json).collect());
        }
    }
    if let Some(minimum) = query.minimum_should_match {
        body.insert("minimum_should_match".into(), json!(minimum));
    }
    json!({ "bool": body })
}

fn highlight_json(spec: &HighlightSpec) -> Value {
    let fields: Map<String, Value> = spec
        .fields
        .iter()
        .map(|f| (f.as_str().to_string(), json!({})))
        .collect();
    json!({
        "pre_tags": [spec.pre_tag],
        "post_tags": [spec.post_tag],
        "fields": fields,
    })
}

pub(super) fn search_body(request: &SearchRequest) -> Value {
    let mut body = json!({
        "query": bool_json(&request.query),
        "from": request.from,
        "size": request.size,
        "track_total_hits": true,
    });
    if let Some(highlight) = &request.highlight {
        body["highlight"] = highlight_json(highlight);
    }
    body
}

pub(super) fn index_mappings() -> Value {
    json!({
        "mappings": {
            "properties": {
                "id": { "type": "long" },
                "title": { "type": "text" },
                "content": { "type": "text" },
                "content_summary": { "type": "text" },
                "author_id": { "type": "keyword" },
                "category_id": { "type": "long" },
                "status": { "type": "keyword" },
                "visibility_range": { "type": "keyword" },
                "importance": { "type": "integer" },
                "has_attachments": { "type": "boolean" },
                "created_at": { "type": "date" },
                "updated_at": { "type": "date" }
            }
        }
    })
}
