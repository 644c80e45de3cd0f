use std::fmt;

/// Per-field term lists. An empty list places no constraint on its field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Matched against `description + categ`.
    pub text: Vec<String>,
    pub desc: Vec<String>,
    pub categ: Vec<String>,
    /// Four-digit year.
    pub y: Vec<String>,
    /// Two-digit month.
    pub m: Vec<String>,
    /// Two-digit day of month.
    pub d: Vec<String>,
    /// Comparisons such as `>100` or `<-20`.
    pub amount: Vec<String>,
}

impl Query {
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, terms)| terms.is_empty())
    }

    /// Field names paired with their term lists, in canonical order.
    fn fields(&self) -> [(&'static str, &[String]); 7] {
        [
            ("text", self.text.as_slice()),
            ("desc", self.desc.as_slice()),
            ("categ", self.categ.as_slice()),
            ("y", self.y.as_slice()),
            ("m", self.m.as_slice()),
            ("d", self.d.as_slice()),
            ("amount", self.amount.as_slice()),
        ]
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, terms) in self.fields() {
            if terms.is_empty() {
                continue;
            }
            if !first {
                write!(f, " ")?;
            }
            first = false;
            let joined = terms.join(",");
            if joined.contains(' ') {
                write!(f, "{name}:\"{joined}\"")?;
            } else {
                write!(f, "{name}:{joined}")?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub name: String,
    pub enabled: bool,
    pub query: Query,
}

impl Filter {
    pub fn new(name: String, query: Query) -> Self {
        Self {
            name,
            enabled: true,
            query,
        }
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.enabled { "on" } else { "off" };
        write!(f, "{} [{state}] {}", self.name, self.query)
    }
}
