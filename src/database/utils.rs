use regex::Regex;

/// Collapses whitespace and rewrites `?` placeholders to Postgres `$n`
/// positional parameters, so queries can be written in the portable style.
pub fn sql(query: &str) -> String {
    let cleaned = query.split_whitespace().collect::<Vec<&str>>().join(" ");
    let re = Regex::new(r"\?").unwrap();
    let mut param_index = 1;
    let mut result = cleaned;
    while let Some(range) = re.find(&result).map(|mat| mat.range()) {
        let replacement = format!("${}", param_index);
        result.replace_range(range, &replacement);
        param_index += 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::sql;
    use pretty_assertions::assert_eq;

    #[test]
    fn rewrites_placeholders_in_order() {
        assert_eq!(
            sql("SELECT * FROM payrolls WHERE month = ? AND year = ?"),
            "SELECT * FROM payrolls WHERE month = $1 AND year = $2"
        );
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(sql("SELECT\n  id\nFROM\n  employees"), "SELECT id FROM employees");
    }
}
