// Tests for the built-in element model
//
//  Copyright (C) 2014-2022 Ryan Specialty Group, LLC.
//
//  This file is part of xmlmagic.
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.

use super::*;
use crate::{
    ele::{AnyObject, BuildError, Child},
    parse::{ParseError, ParseResult, Parser},
    resolve::{Resolver, TableResolver},
    xir::reader::XmlReader,
};
use std::sync::Arc;

const NS: &str = r#"xmlns="urn:xmlmagic:model""#;

struct Fixture {
    scope: Arc<Scope>,
    model: Model,
}

impl Fixture {
    fn new() -> Self {
        let scope = Arc::new(Scope::new());
        let model = Model::register(&scope).expect("registration failed");

        Self { scope, model }
    }

    fn parser<'r>(&self) -> Parser<'r> {
        Parser::new(self.scope.clone())
    }

    fn parse_with(
        &self,
        src: &str,
        resolver: &dyn Resolver,
    ) -> ParseResult<Option<Value>> {
        self.parser()
            .with_resolver(resolver)
            .pull_any(XmlReader::new(src.as_bytes()))
            .map(Value::from_child)
    }

    fn parse(&self, src: &str) -> ParseResult<Option<Value>> {
        self.parser()
            .pull_any(XmlReader::new(src.as_bytes()))
            .map(Value::from_child)
    }

    fn value(&self, src: &str) -> Option<Value> {
        self.parse(src).expect("parse failed")
    }
}

fn string(s: &str) -> Option<Value> {
    Some(Value::Str(s.into()))
}

fn boolean(b: bool) -> Option<Value> {
    Some(Value::Bool(b))
}

#[test]
fn string_from_attribute_or_text() {
    let fx = Fixture::new();

    assert_eq!(
        fx.value(&format!(r#"<string {NS} value="a" />"#)),
        string("a"),
    );
    assert_eq!(fx.value(&format!("<string {NS}>b</string>")), string("b"));
}

#[test]
fn string_attribute_wins_over_text() {
    let fx = Fixture::new();

    assert_eq!(
        fx.value(&format!(r#"<string {NS} value="attr">text</string>"#)),
        string("attr"),
    );
}

#[test]
fn empty_string_is_absent() {
    let fx = Fixture::new();

    assert_eq!(fx.value(&format!("<string {NS} />")), None);
}

#[test]
fn string_is_formatted() {
    let fx = Fixture::new();
    let table: TableResolver = [("name", "world")].into_iter().collect();

    assert_eq!(
        fx.parse_with(
            &format!(r#"<string {NS} value="hello {{name}}" />"#),
            &table,
        )
        .unwrap(),
        string("hello world"),
    );

    assert_eq!(
        fx.parse_with(&format!("<string {NS}>{{name}}!</string>"), &table)
            .unwrap(),
        string("world!"),
    );
}

#[test]
fn boolean_values() {
    let fx = Fixture::new();
    let attr = |v: &str| format!(r#"<boolean {NS} value="{v}" />"#);

    assert_eq!(fx.value(&attr("true")), boolean(true));
    assert_eq!(fx.value(&attr("TRUE")), boolean(true));
    assert_eq!(fx.value(&attr("1")), boolean(true));
    assert_eq!(fx.value(&attr("yes")), boolean(false));
    assert_eq!(fx.value(&attr("")), boolean(false));

    assert_eq!(
        fx.value(&format!("<boolean {NS}> True </boolean>")),
        boolean(true),
    );
}

#[test]
fn boolean_defaults_to_false() {
    let fx = Fixture::new();

    assert_eq!(fx.value(&format!("<boolean {NS} />")), boolean(false));
}

#[test]
fn integer_values() {
    let fx = Fixture::new();

    assert_eq!(
        fx.value(&format!(r#"<integer {NS} value="42" />"#)),
        Some(Value::Int(42)),
    );
    assert_eq!(
        fx.value(&format!("<integer {NS}>-7</integer>")),
        Some(Value::Int(-7)),
    );
    assert_eq!(fx.value(&format!("<integer {NS} />")), None);
}

#[test]
fn integer_rejects_non_integer() {
    let fx = Fixture::new();

    match fx.parse(&format!(r#"<integer {NS} value="4x2" />"#)) {
        Err(ParseError::Build {
            element,
            source: BuildError::InvalidValue { value, .. },
        }) => {
            assert_eq!(element, name("integer"));
            assert_eq!(value, "4x2");
        }
        other => panic!("unexpected result: {other:?}"),
    }

    assert!(matches!(
        fx.parse(&format!("<integer {NS}>9.5</integer>")),
        Err(ParseError::Build {
            source: BuildError::InvalidValue { .. },
            ..
        }),
    ));
}

fn bools(op: &str, values: &[bool], extra: &str) -> String {
    let children: String = values
        .iter()
        .map(|v| format!(r#"<boolean value="{v}" />"#))
        .collect();

    format!("<{op} {NS} {extra}>{children}</{op}>")
}

#[test]
fn and_or_xor_fold_children() {
    let fx = Fixture::new();

    assert_eq!(fx.value(&bools("and", &[true, true], "")), boolean(true));
    assert_eq!(fx.value(&bools("and", &[true, false], "")), boolean(false));
    assert_eq!(fx.value(&bools("or", &[false, true], "")), boolean(true));
    assert_eq!(fx.value(&bools("or", &[false, false], "")), boolean(false));
    assert_eq!(fx.value(&bools("xor", &[true, false], "")), boolean(true));
    assert_eq!(fx.value(&bools("xor", &[true, true], "")), boolean(false));
    assert_eq!(
        fx.value(&bools("xor", &[true, true, true], "")),
        boolean(true),
    );
}

#[test]
fn boolean_operation_inverts() {
    let fx = Fixture::new();
    let invert = r#"invert="true""#;

    assert_eq!(
        fx.value(&bools("and", &[true, true], invert)),
        boolean(false),
    );
    assert_eq!(fx.value(&bools("or", &[false], invert)), boolean(true));
}

#[test]
fn boolean_operation_without_children_is_false() {
    let fx = Fixture::new();

    assert_eq!(fx.value(&bools("and", &[], "")), boolean(false));
    assert_eq!(fx.value(&bools("or", &[], "")), boolean(false));
    assert_eq!(
        fx.value(&bools("and", &[], r#"invert="1""#)),
        boolean(true),
    );
}

#[test]
fn boolean_operation_ignores_non_boolean_children() {
    let fx = Fixture::new();

    assert_eq!(
        fx.value(&format!(
            r#"<and {NS}><string value="x" /><boolean value="true" /></and>"#
        )),
        boolean(true),
    );
}

#[test]
fn boolean_operations_nest() {
    let fx = Fixture::new();

    assert_eq!(
        fx.value(&format!(
            r#"<or {NS}>
                 <and><boolean value="true" /><boolean value="false" /></and>
                 <xor><boolean value="true" /><boolean value="false" /></xor>
               </or>"#
        )),
        boolean(true),
    );
}

#[test]
fn equals_compares_all_children() {
    let fx = Fixture::new();

    assert_eq!(
        fx.value(&format!(
            r#"<equals {NS}>
                 <string value="a" /><string>a</string><string value="a" />
               </equals>"#
        )),
        boolean(true),
    );

    assert_eq!(
        fx.value(&format!(
            r#"<equals {NS}>
                 <string value="a" /><string value="a" /><string value="b" />
               </equals>"#
        )),
        boolean(false),
    );
}

#[test]
fn equals_distinguishes_types() {
    let fx = Fixture::new();

    assert_eq!(
        fx.value(&format!(
            r#"<equals {NS}><integer value="1" /><string value="1" /></equals>"#
        )),
        boolean(false),
    );
}

#[test]
fn equals_with_absent_children() {
    let fx = Fixture::new();

    assert_eq!(
        fx.value(&format!("<equals {NS}><string /><string /></equals>")),
        boolean(true),
    );
    assert_eq!(
        fx.value(&format!(
            r#"<equals {NS}><string /><string value="x" /></equals>"#
        )),
        boolean(false),
    );
}

#[test]
fn equals_children_without_value_type_are_unequal() {
    let fx = Fixture::new();

    assert_eq!(
        fx.value(&format!(
            r#"<equals {NS}>
                 <query-parameter key="a">1</query-parameter>
                 <query-parameter key="b">2</query-parameter>
               </equals>"#
        )),
        boolean(false),
    );

    assert_eq!(
        fx.value(&format!(
            r#"<equals {NS}>
                 <query-parameter key="a">1</query-parameter>
                 <query-parameter key="a">1</query-parameter>
               </equals>"#
        )),
        boolean(false),
    );
}

#[test]
fn equals_with_fewer_than_two_children_is_true() {
    let fx = Fixture::new();

    assert_eq!(fx.value(&format!("<equals {NS} />")), boolean(true));
    assert_eq!(
        fx.value(&format!(r#"<equals {NS}><integer value="3" /></equals>"#)),
        boolean(true),
    );
}

fn map_of<const N: usize>(entries: [(&str, Value); N]) -> Option<Value> {
    Some(Value::Map(
        entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
    ))
}

#[test]
fn map_of_entries() {
    let fx = Fixture::new();

    assert_eq!(
        fx.value(&format!(
            r#"<map {NS}>
                 <entry key="name">Alice</entry>
                 <entry key="admin"><boolean value="true" /></entry>
                 <entry key="age"><integer value="30" /></entry>
                 <entry key="nested">
                   <map><entry key="x">y</entry></map>
                 </entry>
               </map>"#
        )),
        map_of([
            ("admin", Value::Bool(true)),
            ("age", Value::Int(30)),
            ("name", "Alice".into()),
            ("nested", map_of([("x", "y".into())]).unwrap()),
        ]),
    );
}

#[test]
fn empty_map() {
    let fx = Fixture::new();

    assert_eq!(fx.value(&format!("<map {NS} />")), map_of([]));
}

#[test]
fn map_later_duplicate_key_wins() {
    let fx = Fixture::new();

    assert_eq!(
        fx.value(&format!(
            r#"<map {NS}>
                 <entry key="k">a</entry><entry key="k">b</entry>
               </map>"#
        )),
        map_of([("k", "b".into())]),
    );
}

#[test]
fn map_drops_entries_without_value_and_other_children() {
    let fx = Fixture::new();

    assert_eq!(
        fx.value(&format!(
            r#"<map {NS}>
                 <entry key="none" />
                 <entry key="absent"><string /></entry>
                 <string value="ignored" />
                 <entry key="kept">v</entry>
               </map>"#
        )),
        map_of([("kept", "v".into())]),
    );
}

#[test]
fn map_entry_values_are_formatted() {
    let fx = Fixture::new();
    let table: TableResolver = [("who", "Bob")].into_iter().collect();

    assert_eq!(
        fx.parse_with(
            &format!(r#"<map {NS}><entry key="k">hi {{who}}</entry></map>"#),
            &table,
        )
        .unwrap(),
        map_of([("k", "hi Bob".into())]),
    );
}

#[test]
fn entry_without_key_is_incomplete() {
    let fx = Fixture::new();

    match fx.parse(&format!("<map {NS}><entry>v</entry></map>")) {
        Err(ParseError::Build {
            element,
            source: BuildError::IncompleteElement { .. },
        }) => assert_eq!(element, name("entry")),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn entry_with_second_child_is_ambiguous() {
    let fx = Fixture::new();

    match fx.parse(&format!(
        r#"<map {NS}>
             <entry key="k"><string value="a" /><string value="b" /></entry>
           </map>"#
    )) {
        Err(ParseError::Build {
            element,
            source: BuildError::AmbiguousChild { child, .. },
        }) => {
            assert_eq!(element, name("entry"));
            assert_eq!(child, name("string"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn entry_absent_child_does_not_fill() {
    let fx = Fixture::new();

    assert_eq!(
        fx.value(&format!(
            r#"<map {NS}>
                 <entry key="k"><string /><string value="b" /></entry>
               </map>"#
        )),
        map_of([("k", "b".into())]),
    );
}

#[test]
fn entry_first_of_text_or_child_wins() {
    let fx = Fixture::new();

    assert_eq!(
        fx.value(&format!(
            r#"<map {NS}>
                 <entry key="t">text<integer value="1" /></entry>
                 <entry key="c"><integer value="2" />text</entry>
               </map>"#
        )),
        map_of([("c", Value::Int(2)), ("t", "text".into())]),
    );
}

#[test]
fn map_recycles_entries() {
    let fx = Fixture::new();
    let parser = fx.parser();

    let src = format!(
        r#"<map {NS}>
             <entry key="a">1</entry>
             <entry key="b">2</entry>
             <entry key="c">3</entry>
           </map>"#
    );

    let first = parser
        .pull(&fx.model.map, None, XmlReader::new(src.as_bytes()))
        .unwrap();

    // Each entry is released before the next one is opened.
    assert_eq!(parser.pool().available(fx.model.entry.as_any()), 1);

    let second = parser
        .pull(&fx.model.map, None, XmlReader::new(src.as_bytes()))
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first.map(|m| m.len()), Some(3));
}

#[test]
fn released_map_is_reused_and_cleared() {
    let fx = Fixture::new();
    let parser = fx.parser();
    let stale: ValueMap = [("stale".to_string(), Value::Int(1))].into();

    assert!(parser
        .pool()
        .release(fx.model.map.as_any(), Box::new(stale) as AnyObject));
    assert_eq!(parser.pool().available(fx.model.map.as_any()), 1);

    assert_eq!(
        parser
            .pull_any(XmlReader::new(
                format!(r#"<map {NS}><entry key="k">v</entry></map>"#)
                    .as_bytes(),
            ))
            .map(Value::from_child)
            .unwrap(),
        map_of([("k", "v".into())]),
    );

    // Taken by the parse above and not handed back.
    assert_eq!(parser.pool().available(fx.model.map.as_any()), 0);
}

#[test]
fn recycled_entry_is_reset() {
    let fx = Fixture::new();
    let parser = fx.parser();

    parser
        .pull(
            &fx.model.map,
            None,
            XmlReader::new(
                format!(r#"<map {NS}><entry key="old">x</entry></map>"#)
                    .as_bytes(),
            ),
        )
        .unwrap();

    // The recycled entry must not carry its previous key.
    assert!(matches!(
        parser.pull(
            &fx.model.map,
            None,
            XmlReader::new(
                format!("<map {NS}><entry>y</entry></map>").as_bytes(),
            ),
        ),
        Err(ParseError::Build {
            source: BuildError::IncompleteElement { .. },
            ..
        }),
    ));
}

#[test]
fn recycled_map_is_cleared() {
    let fx = Fixture::new();
    let stale: ValueMap = [("stale".to_string(), Value::Int(1))].into();

    let map = fx
        .parser()
        .pull(
            &fx.model.map,
            Some(stale),
            XmlReader::new(
                format!(r#"<map {NS}><entry key="k">v</entry></map>"#)
                    .as_bytes(),
            ),
        )
        .unwrap();

    assert_eq!(map.map(Value::Map), map_of([("k", "v".into())]));
}

fn uri(src: &str) -> ParseResult<Option<Value>> {
    Fixture::new().parse(src)
}

#[test]
fn uri_from_attributes() {
    assert_eq!(
        uri(&format!(
            r#"<uri {NS} scheme="https" authority="example.com"
                   path="/a b" fragment="top" />"#
        ))
        .unwrap(),
        string("https://example.com/a%20b#top"),
    );
}

#[test]
fn uri_from_children() {
    assert_eq!(
        uri(&format!(
            r#"<uri {NS}>
                 <scheme>https</scheme>
                 <authority>example.com</authority>
                 <append-path>users</append-path>
                 <append-path>42</append-path>
                 <query-parameter key="lang">en</query-parameter>
                 <query-parameter key="q">a b</query-parameter>
                 <fragment>top</fragment>
               </uri>"#
        ))
        .unwrap(),
        string("https://example.com/users/42?lang=en&q=a+b#top"),
    );
}

#[test]
fn uri_appends_to_path() {
    assert_eq!(
        uri(&format!(
            r#"<uri {NS} scheme="https" authority="h" path="/base/">
                 <append-path>x y</append-path>
               </uri>"#
        ))
        .unwrap(),
        string("https://h/base/x%20y"),
    );
}

#[test]
fn uri_query_parameter_without_text_is_empty() {
    assert_eq!(
        uri(&format!(
            r#"<uri {NS} scheme="https" authority="h">
                 <query-parameter key="flag" />
               </uri>"#
        ))
        .unwrap(),
        string("https://h/?flag="),
    );
}

#[test]
fn uri_from_text() {
    assert_eq!(
        uri(&format!(
            "<uri {NS}>https://example.com/users?lang=en#x</uri>"
        ))
        .unwrap(),
        string("https://example.com/users?lang=en#x"),
    );
}

#[test]
fn uri_text_replaces_earlier_parts() {
    assert_eq!(
        uri(&format!(
            r#"<uri {NS} scheme="ftp" authority="old" fragment="f">
                 https://example.com/x</uri>"#
        ))
        .unwrap(),
        string("https://example.com/x"),
    );
}

#[test]
fn uri_children_apply_on_top_of_text() {
    assert_eq!(
        uri(&format!(
            r#"<uri {NS}>https://example.com/x?a=1<scheme>http</scheme>
                 <query-parameter key="b">2</query-parameter>
                 <fragment>f</fragment>
               </uri>"#
        ))
        .unwrap(),
        string("http://example.com/x?a=1&b=2#f"),
    );
}

#[test]
fn uri_absent_children_keep_parts() {
    assert_eq!(
        uri(&format!(
            r#"<uri {NS} scheme="https" authority="h"><scheme /></uri>"#
        ))
        .unwrap(),
        string("https://h/"),
    );

    assert_eq!(
        uri(&format!(
            r#"<uri {NS} scheme="https" authority="h" fragment="top">
                 <authority /><fragment />
               </uri>"#
        ))
        .unwrap(),
        string("https://h/#top"),
    );
}

#[test]
fn uri_absent_path_child_clears_path() {
    assert_eq!(
        uri(&format!(
            r#"<uri {NS} scheme="https" authority="h" path="/a"><path /></uri>"#
        ))
        .unwrap(),
        string("https://h/"),
    );
}

#[test]
fn uri_with_only_absent_children_is_absent() {
    assert_eq!(
        uri(&format!("<uri {NS}><scheme /><fragment /></uri>")).unwrap(),
        None,
    );
}

#[test]
fn uri_without_scheme_is_incomplete() {
    match uri(&format!(r#"<uri {NS} authority="example.com" />"#)) {
        Err(ParseError::Build {
            element,
            source: BuildError::IncompleteElement { .. },
        }) => assert_eq!(element, name("uri")),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn uri_without_parts_is_absent() {
    assert_eq!(uri(&format!("<uri {NS} />")).unwrap(), None);
}

#[test]
fn uri_invalid_text() {
    assert!(matches!(
        uri(&format!("<uri {NS}>not a uri</uri>")),
        Err(ParseError::Build {
            source: BuildError::InvalidValue { .. },
            ..
        }),
    ));
}

#[test]
fn query_parameter_without_key_is_incomplete() {
    match uri(&format!(
        r#"<uri {NS} scheme="https" authority="h">
             <query-parameter>v</query-parameter>
           </uri>"#
    )) {
        Err(ParseError::Build {
            element,
            source: BuildError::IncompleteElement { .. },
        }) => assert_eq!(element, name("query-parameter")),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn value_from_child_conversions() {
    let fx = Fixture::new();
    let child = |value: Option<AnyObject>| {
        Value::from_child(Child::new(fx.model.string.as_any().clone(), value))
    };

    assert_eq!(
        child(Some(Box::new(String::from("s")) as AnyObject)),
        string("s"),
    );
    assert_eq!(child(Some(Box::new(true) as AnyObject)), boolean(true));
    assert_eq!(
        child(Some(Box::new(5i64) as AnyObject)),
        Some(Value::Int(5)),
    );
    assert_eq!(
        child(Some(Box::new(Value::Int(1)) as AnyObject)),
        Some(Value::Int(1)),
    );
    assert_eq!(child(Some(Box::new(3u8) as AnyObject)), None);
    assert_eq!(child(None), None);
}

#[test]
fn value_display_and_serialization() {
    let map = map_of([("a", Value::Int(1)), ("b", "x".into())]).unwrap();

    assert_eq!(Value::Str("x".into()).to_string(), "x");
    assert_eq!(Value::Bool(true).to_string(), "true");
    assert_eq!(map.to_string(), r#"{"a":1,"b":"x"}"#);
    assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"a":1,"b":"x"}"#);
}

#[test]
fn register_twice_in_one_scope_fails() {
    let fx = Fixture::new();

    assert!(matches!(
        Model::register(&fx.scope),
        Err(RegistryError::Duplicate(_)),
    ));
}

#[test]
fn global_model_is_registered_once() {
    let a = Model::global().expect("global registration failed");
    let b = Model::global().expect("global registration failed");

    assert_eq!(a.string, b.string);
    assert_eq!(
        Scope::global().lookup(name("string")).as_ref(),
        Some(a.string.as_any()),
    );
}

#[derive(Debug, Default, PartialEq)]
struct Account {
    id: i64,
    name: String,
    active: bool,
    tags: Vec<String>,
    note: String,
}

fn account_table() -> FieldTable<Account> {
    FieldTable::<Account>::new()
        .with_attr(QName::new_local("name"), |acct, attr| {
            acct.name = attr.value().into();
            Ok(())
        })
        .with_attr(QName::new_local("active"), |acct, attr| {
            acct.active = attr.to_bool();
            Ok(())
        })
        .with_child(name("string"), |acct, child| {
            if let Ok(Some(tag)) = child.downcast::<String>() {
                acct.tags.push(tag);
            }
            Ok(())
        })
        .with_text(|acct, text| {
            acct.note.push_str(text);
            Ok(())
        })
}

#[test]
fn record_populated_from_table() {
    let fx = Fixture::new();
    let scope = Arc::new(Scope::child_of(fx.scope.clone()));
    let desc = scope
        .define(
            QName::new("urn:test", "account"),
            RecordBuilder::new(account_table()),
        )
        .unwrap();

    let src = format!(
        r#"<account xmlns="urn:test" xmlns:m="urn:xmlmagic:model"
                    name="alice" active="true" unknown="x">
             note<m:string value="a" /><m:integer value="1" />
             <m:string value="b" />
           </account>"#
    );

    let acct = Parser::new(scope)
        .pull(&desc, None, XmlReader::new(src.as_bytes()))
        .unwrap();

    assert_eq!(
        acct,
        Some(Account {
            id: 0,
            name: "alice".into(),
            active: true,
            tags: vec!["a".into(), "b".into()],
            note: "note".into(),
        }),
    );
}

#[test]
fn record_populates_supplied_instance() {
    let fx = Fixture::new();
    let scope = Arc::new(Scope::child_of(fx.scope.clone()));
    let desc = scope
        .define(
            QName::new("urn:test", "account"),
            RecordBuilder::new(account_table()),
        )
        .unwrap();

    let existing = Account {
        id: 7,
        name: "old".into(),
        ..Default::default()
    };

    let src = r#"<account xmlns="urn:test" name="new" />"#;
    let acct = Parser::new(scope)
        .pull(&desc, Some(existing), XmlReader::new(src.as_bytes()))
        .unwrap()
        .unwrap();

    assert_eq!(acct.id, 7);
    assert_eq!(acct.name, "new");
}

#[test]
fn record_setter_failure_fails_element() {
    let scope = Arc::new(Scope::new());
    let table = FieldTable::<Account>::new().with_attr(
        QName::new_local("id"),
        |acct, attr| {
            acct.id = attr.to_int().ok_or(BuildError::InvalidValue {
                element: QName::new("urn:test", "account"),
                value: attr.value().into(),
                reason: "expected an integer".into(),
            })?;
            Ok(())
        },
    );
    let desc = scope
        .define(QName::new("urn:test", "account"), RecordBuilder::new(table))
        .unwrap();

    let src = r#"<account xmlns="urn:test" id="x" />"#;

    assert!(matches!(
        Parser::new(scope).pull(&desc, None, XmlReader::new(src.as_bytes())),
        Err(ParseError::Build {
            source: BuildError::InvalidValue { .. },
            ..
        }),
    ));
}
