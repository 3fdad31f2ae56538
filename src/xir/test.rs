// Tests for XIR
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

#[test]
fn qname_equality_requires_both_parts() {
    assert_eq!(QName::new("urn:a", "foo"), QName::new("urn:a", "foo"));
    assert_ne!(QName::new("urn:a", "foo"), QName::new("urn:b", "foo"));
    assert_ne!(QName::new("urn:a", "foo"), QName::new("urn:a", "bar"));
    assert_ne!(QName::new("urn:a", "foo"), QName::new_local("foo"));
}

#[test]
fn qname_empty_namespace_is_no_namespace() {
    assert_eq!(QName::new("", "foo"), QName::new_local("foo"));
    assert_eq!(None, QName::new("", "foo").namespace());
}

#[test]
fn qname_display_clark_notation() {
    assert_eq!("{urn:a}foo", QName::new("urn:a", "foo").to_string());
    assert_eq!("foo", QName::new_local("foo").to_string());
}

#[test]
fn raw_value_to_bool() {
    assert!(RawValue::from("true").to_bool());
    assert!(RawValue::from("TRUE").to_bool());
    assert!(RawValue::from("1").to_bool());
    assert!(!RawValue::from("yes").to_bool());
    assert!(!RawValue::from("").to_bool());
    assert!(RawValue::Bool(true).to_bool());
    assert!(RawValue::Int(7).to_bool());
    assert!(!RawValue::Int(0).to_bool());
}

#[test]
fn raw_value_to_int() {
    assert_eq!(Some(42), RawValue::from(" 42 ").to_int());
    assert_eq!(Some(-3), RawValue::from("-3").to_int());
    assert_eq!(None, RawValue::from("4x").to_int());
    assert_eq!(Some(1), RawValue::Bool(true).to_int());
    assert_eq!(Some(9), RawValue::Int(9).to_int());
}

#[test]
fn raw_value_as_text() {
    assert_eq!("abc", RawValue::from("abc").as_text());
    assert_eq!("false", RawValue::Bool(false).as_text());
    assert_eq!("12", RawValue::Int(12).as_text());
}
