#![allow(clippy::unwrap_used)]

use crate::models::Query;

fn terms(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_parse_empty_input() {
    assert!(Query::parse("").is_empty());
    assert!(Query::parse("   ").is_empty());
}

#[test]
fn test_parse_bare_words_are_text() {
    let q = Query::parse("coffee !tea");
    assert_eq!(q.text, terms(&["coffee", "!tea"]));
    assert!(q.desc.is_empty());
}

#[test]
fn test_parse_fields() {
    let q = Query::parse("desc:rent categ:housing y:2023 m:01 d:05 amount:<-100");
    assert_eq!(q.desc, terms(&["rent"]));
    assert_eq!(q.categ, terms(&["housing"]));
    assert_eq!(q.y, terms(&["2023"]));
    assert_eq!(q.m, terms(&["01"]));
    assert_eq!(q.d, terms(&["05"]));
    assert_eq!(q.amount, terms(&["<-100"]));
    assert!(q.text.is_empty());
}

#[test]
fn test_parse_comma_separated_terms() {
    let q = Query::parse("desc:coffee,tea,,juice");
    assert_eq!(q.desc, terms(&["coffee", "tea", "juice"]));
}

#[test]
fn test_parse_repeated_field_appends() {
    let q = Query::parse("amount:<-100 amount:>100");
    assert_eq!(q.amount, terms(&["<-100", ">100"]));
}

#[test]
fn test_parse_quoted_value() {
    let q = Query::parse(r#"desc:"whole foods" "corner shop""#);
    assert_eq!(q.desc, terms(&["whole foods"]));
    assert_eq!(q.text, terms(&["corner shop"]));
}

#[test]
fn test_parse_unterminated_quote_runs_to_end() {
    let q = Query::parse(r#"desc:"whole foods"#);
    assert_eq!(q.desc, terms(&["whole foods"]));
}

#[test]
fn test_parse_field_aliases_case_insensitive() {
    let q = Query::parse("CAT:food Year:2022 month:12 day:31 amt:>5 Description:bus");
    assert_eq!(q.categ, terms(&["food"]));
    assert_eq!(q.y, terms(&["2022"]));
    assert_eq!(q.m, terms(&["12"]));
    assert_eq!(q.d, terms(&["31"]));
    assert_eq!(q.amount, terms(&[">5"]));
    assert_eq!(q.desc, terms(&["bus"]));
}

#[test]
fn test_parse_unknown_field_is_text() {
    let q = Query::parse("payee:acme");
    assert_eq!(q.text, terms(&["payee:acme"]));
}

#[test]
fn test_parse_keeps_term_case() {
    // Lower-casing happens at match time
    let q = Query::parse("desc:Coffee");
    assert_eq!(q.desc, terms(&["Coffee"]));
}

#[test]
fn test_parse_display_round_trip() {
    let input = r#"text:!rent desc:"whole foods,market" categ:food y:2023 amount:<-10,>500"#;
    let q = Query::parse(input);
    assert_eq!(Query::parse(&q.to_string()), q);
}
