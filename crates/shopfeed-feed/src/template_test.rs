use super::*;

fn context(pairs: &[(&str, ContextValue)]) -> Context {
    let mut ctx = Context::new();
    for (key, value) in pairs {
        ctx.insert(*key, value.clone());
    }
    ctx
}

#[test]
fn ternary_greater_than_takes_true_branch() {
    let ctx = context(&[("a.b", ContextValue::Integer(5))]);
    assert_eq!(evaluate_template("a.b > 0 ? 'yes' : 'no'", &ctx), "yes");
}

#[test]
fn ternary_zero_takes_false_branch() {
    let ctx = context(&[("a.b", ContextValue::Integer(0))]);
    assert_eq!(evaluate_template("a.b > 0 ? 'yes' : 'no'", &ctx), "no");
}

#[test]
fn ternary_missing_key_takes_false_branch() {
    assert_eq!(evaluate_template("a.b > 0 ? 'yes' : 'no'", &Context::new()), "no");
}

#[test]
fn ternary_falsy_left_is_false_even_for_less_than() {
    let ctx = context(&[("qty", ContextValue::Integer(0))]);
    assert_eq!(evaluate_template("qty < 10 ? 'low' : 'plenty'", &ctx), "plenty");
}

#[test]
fn ternary_less_than_with_decimal_text() {
    let ctx = context(&[("variant.price", ContextValue::from("9.50"))]);
    assert_eq!(
        evaluate_template(r#"variant.price < 10.5 ? "cheap" : "regular""#, &ctx),
        "cheap"
    );
}

#[test]
fn ternary_non_numeric_left_takes_false_branch() {
    let ctx = context(&[("vendor", ContextValue::from("Maison"))]);
    assert_eq!(evaluate_template("vendor > 1 ? 'a' : 'b'", &ctx), "b");
}

#[test]
fn ternary_string_comparand_is_parsed_but_never_true() {
    let expr = Expression::parse("vendor > abc ? 'a' : 'b'");
    assert_eq!(
        expr,
        Expression::Ternary {
            left: "vendor".to_owned(),
            comparison: Comparison::Greater,
            right: Comparand::Text("abc".to_owned()),
            when_true: "a".to_owned(),
            when_false: "b".to_owned(),
        }
    );
    let ctx = context(&[("vendor", ContextValue::Integer(7))]);
    assert_eq!(expr.evaluate(&ctx), "b");
}

#[test]
fn multi_dot_comparand_is_text() {
    let expr = Expression::parse("qty > 1.2.3 ? 'a' : 'b'");
    assert!(matches!(
        expr,
        Expression::Ternary { right: Comparand::Text(ref t), .. } if t == "1.2.3"
    ));
}

#[test]
fn condition_without_operator_falls_through() {
    let ctx = context(&[("qty", ContextValue::Integer(3))]);
    assert_eq!(evaluate_template("qty ? 'a' : 'b'", &ctx), "qty ? 'a' : 'b'");
    assert_eq!(
        Expression::parse("{qty} ? 'a' : 'b'"),
        Expression::Placeholders("{qty} ? 'a' : 'b'".to_owned())
    );
}

#[test]
fn placeholders_are_substituted() {
    let ctx = context(&[
        ("shop_domain", ContextValue::from("x.com")),
        ("handle", ContextValue::from("shirt")),
    ]);
    assert_eq!(
        evaluate_template("https://{shop_domain}/products/{handle}", &ctx),
        "https://x.com/products/shirt"
    );
}

#[test]
fn unknown_placeholder_is_left_verbatim() {
    let ctx = context(&[("handle", ContextValue::from("shirt"))]);
    assert_eq!(
        evaluate_template("/products/{handle}?ref={campaign}", &ctx),
        "/products/shirt?ref={campaign}"
    );
}

#[test]
fn falsy_values_substitute_as_empty() {
    let ctx = context(&[
        ("qty", ContextValue::Integer(0)),
        ("sku", ContextValue::Absent),
        ("barcode", ContextValue::from("")),
        ("id", ContextValue::Integer(42)),
    ]);
    assert_eq!(
        evaluate_template("{id}|{qty}|{sku}|{barcode}", &ctx),
        "42|||"
    );
}

#[test]
fn repeated_placeholder_is_replaced_everywhere() {
    let ctx = context(&[("handle", ContextValue::from("shirt"))]);
    assert_eq!(evaluate_template("{handle}-{handle}", &ctx), "shirt-shirt");
}

#[test]
fn plain_text_is_literal() {
    assert_eq!(
        Expression::parse("new"),
        Expression::Literal("new".to_owned())
    );
    assert_eq!(evaluate_template("new", &Context::new()), "new");
}

#[test]
fn context_insert_replaces_in_place() {
    let mut ctx = Context::new();
    ctx.insert("a", ContextValue::Integer(1));
    ctx.insert("b", ContextValue::Integer(2));
    ctx.insert("a", ContextValue::Integer(3));
    let keys: Vec<&str> = ctx.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, ["a", "b"]);
    assert_eq!(ctx.get("a"), Some(&ContextValue::Integer(3)));
    assert_eq!(ctx.len(), 2);
}
