use regex::Regex;
use std::sync::OnceLock;

use crate::models::Query;

/// `field:value`, `field:"quoted value"`, `"quoted"` or a bare word.
fn token_regex() -> Option<&'static Regex> {
    static TOKEN: OnceLock<Option<Regex>> = OnceLock::new();
    TOKEN
        .get_or_init(|| Regex::new(r#"(?:([A-Za-z]+):)?(?:"([^"]*)"?|(\S+))"#).ok())
        .as_ref()
}

impl Query {
    /// Parse a query string such as `desc:coffee,tea amount:<0 y:2023`.
    ///
    /// Bare words become `text` terms. Values split on `,` into OR-ed terms.
    /// Unknown fields fall back to a text term of the whole token. Never fails.
    pub fn parse(input: &str) -> Self {
        let mut query = Query::default();
        let Some(token) = token_regex() else {
            tracing::error!("Query tokenizer failed to compile");
            return query;
        };

        for caps in token.captures_iter(input) {
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .map(|m| m.as_str())
                .unwrap_or_default();

            let key = match caps.get(1).map(|m| m.as_str()) {
                None => "text",
                Some(name) => match canonical_field(name) {
                    Some(key) => key,
                    None => {
                        tracing::debug!(field = name, value, "Unknown query field, treating as text");
                        push_terms(&mut query.text, &format!("{name}:{value}"));
                        continue;
                    }
                },
            };
            push_terms(query.terms_mut(key), value);
        }

        query
    }

    fn terms_mut(&mut self, key: &str) -> &mut Vec<String> {
        match key {
            "desc" => &mut self.desc,
            "categ" => &mut self.categ,
            "y" => &mut self.y,
            "m" => &mut self.m,
            "d" => &mut self.d,
            "amount" => &mut self.amount,
            _ => &mut self.text,
        }
    }
}

fn canonical_field(name: &str) -> Option<&'static str> {
    match name.to_lowercase().as_str() {
        "text" => Some("text"),
        "desc" | "description" => Some("desc"),
        "categ" | "cat" | "category" => Some("categ"),
        "y" | "year" => Some("y"),
        "m" | "month" => Some("m"),
        "d" | "day" => Some("d"),
        "amount" | "amt" => Some("amount"),
        _ => None,
    }
}

fn push_terms(list: &mut Vec<String>, value: &str) {
    list.extend(
        value
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string),
    );
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
