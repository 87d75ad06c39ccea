use std::fmt;

/// Fluent helper for composing the predicate text handed to select/delete
/// conditions.
///
/// A condition is just an extending string; every method appends to it and
/// returns the builder, so chains read in SQL order. No parsing or validation
/// happens here, the engine judges the result.
///
/// # Example
/// ```
/// use stitch::Condition;
///
/// let cond = Condition::new("col1 = 5").and("col2 > 10").or("col3 < 20");
/// assert_eq!(cond.to_string(), "col1 = 5 AND col2 > 10 OR col3 < 20");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Condition(String);

impl Condition {
    /// Starts a condition from an initial predicate fragment.
    pub fn new(first: impl Into<String>) -> Self {
        Self(first.into())
    }

    /// Appends `AND <other>`.
    pub fn and(mut self, other: &str) -> Self {
        self.0 = format!("{} AND {}", self.0, other);
        self
    }

    /// Appends `OR <other>`.
    pub fn or(mut self, other: &str) -> Self {
        self.0 = format!("{} OR {}", self.0, other);
        self
    }

    /// Appends `LIKE <pattern>`.
    pub fn like(mut self, pattern: &str) -> Self {
        self.0 = format!("{} LIKE {}", self.0, pattern);
        self
    }

    /// Appends `IN (a,b,...)`.
    pub fn in_list(mut self, items: &[&str]) -> Self {
        self.0 = format!("{} IN ({})", self.0, items.join(","));
        self
    }

    /// The accumulated predicate text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Condition> for String {
    fn from(c: Condition) -> Self {
        c.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_condition() {
        assert_eq!(Condition::new("col1 = 5").as_str(), "col1 = 5");
    }

    #[test]
    fn test_and_or_chain() {
        let cond = Condition::new("col1 = 5").and("col2 > 10").or("col3 < 20");
        assert_eq!(cond.to_string(), "col1 = 5 AND col2 > 10 OR col3 < 20");
    }

    #[test]
    fn test_like() {
        let cond = Condition::new("name").like("'Al%'");
        assert_eq!(cond.as_str(), "name LIKE 'Al%'");
    }

    #[test]
    fn test_in_list() {
        let cond = Condition::new("id").in_list(&["1", "2", "3"]);
        assert_eq!(cond.as_str(), "id IN (1,2,3)");
    }
}
