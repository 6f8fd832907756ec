//! Rewriter Tests
//!
//! Modifier-list changes on whole source texts.

use access_ninja::parser::parse_swift;
use access_ninja::{AccessChange, AccessLevel, AccessRewriter};
use rstest::rstest;

fn rewrite(source: &str, change: AccessChange) -> String {
    let root = parse_swift(source).syntax();
    AccessRewriter::new(change).rewrite(&root).text().to_string()
}

fn force(level: AccessLevel) -> AccessChange {
    AccessChange::force(level)
}

// ============================================================================
// Set level
// ============================================================================

#[rstest]
#[case("func foo() {}", "public func foo() {}")]
#[case("private func foo() {}", "public func foo() {}")]
#[case("    static let x = 1", "    public static let x = 1")]
#[case("public private(set) var x = 0", "public var x = 0")]
#[case("@objc func f() {}", "@objc public func f() {}")]
#[case("@objc\nfunc f() {}", "@objc\npublic func f() {}")]
#[case("import Foundation", "public import Foundation")]
#[case("typealias ID = String", "public typealias ID = String")]
fn test_set_public(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(rewrite(input, force(AccessLevel::Public)), expected);
}

#[rstest]
#[case("private func f() {}", "private func f() {}")]
#[case("internal var v = 1", "internal var v = 1")]
#[case("func f() {}", "public func f() {}")]
fn test_set_skips_if_already_set(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(rewrite(input, AccessChange::set(AccessLevel::Public)), expected);
}

#[test]
fn test_set_is_idempotent() {
    let change = AccessChange::set(AccessLevel::Public);
    let once = rewrite("struct S {\n    func a() {}\n}\n", change);
    assert_eq!(rewrite(&once, change), once);
}

// ============================================================================
// Increase / decrease
// ============================================================================

#[rstest]
#[case("private func foo() {}", "fileprivate func foo() {}")]
#[case("static private var x = 1", "static fileprivate var x = 1")]
#[case("package struct S {}", "public struct S {}")]
#[case("func foo() {}", "func foo() {}")]
fn test_increase(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(rewrite(input, AccessChange::IncreaseLevel), expected);
}

#[rstest]
#[case("public class Foo { func bar() {} }", "package class Foo { func bar() {} }")]
#[case("fileprivate let x = 1", "private let x = 1")]
#[case("open class A {}", "public class A {}")]
fn test_decrease(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(rewrite(input, AccessChange::DecreaseLevel), expected);
}

#[test]
fn test_increase_saturates_at_open() {
    let mut text = "private var x = 1".to_string();
    for _ in 0..7 {
        text = rewrite(&text, AccessChange::IncreaseLevel);
    }
    assert_eq!(text, "open var x = 1");
}

#[test]
fn test_decrease_saturates_at_private() {
    let mut text = "open func f() {}".to_string();
    for _ in 0..7 {
        text = rewrite(&text, AccessChange::DecreaseLevel);
    }
    assert_eq!(text, "private func f() {}");
}

// ============================================================================
// Remove
// ============================================================================

#[rstest]
#[case("/// Docs\npublic func foo() {}\n", "/// Docs\nfunc foo() {}\n")]
#[case("  internal struct S {}", "  struct S {}")]
#[case("static public let a = 1", "static let a = 1")]
#[case("func foo() {}", "func foo() {}")]
#[case("\n\n/* keep */ final class C {}\n", "\n\n/* keep */ final class C {}\n")]
fn test_remove(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(rewrite(input, AccessChange::RemoveAccessControl), expected);
}

#[test]
fn test_remove_keeps_blank_lines_and_doc_comment() {
    let input = "struct S {\n\n    /// The value.\n    /// Second line.\n    public var value = 0\n}\n";
    let expected = "struct S {\n\n    /// The value.\n    /// Second line.\n    var value = 0\n}\n";
    assert_eq!(rewrite(input, AccessChange::RemoveAccessControl), expected);
}

// ============================================================================
// Containers and scopes
// ============================================================================

#[test]
fn test_members_are_rewritten_with_the_container() {
    let input = "struct S {\n    var a = 1\n    private func b() {}\n}";
    let expected = "internal struct S {\n    internal var a = 1\n    internal func b() {}\n}";
    assert_eq!(rewrite(input, force(AccessLevel::Internal)), expected);
}

#[test]
fn test_nested_types_each_use_their_own_level() {
    let input = "class A {\n    private struct B {\n        private let c = 1\n    }\n}";
    let expected = "class A {\n    fileprivate struct B {\n        fileprivate let c = 1\n    }\n}";
    assert_eq!(rewrite(input, AccessChange::IncreaseLevel), expected);
}

#[test]
fn test_extension_with_members_keeps_its_own_level() {
    let input = "private extension Foo {\n    func a() {}\n}";
    let expected = "private extension Foo {\n    public func a() {}\n}";
    assert_eq!(rewrite(input, force(AccessLevel::Public)), expected);
}

#[test]
fn test_empty_extension_is_rewritten() {
    assert_eq!(
        rewrite("public extension Foo {}", AccessChange::RemoveAccessControl),
        "extension Foo {}"
    );
}

#[test]
fn test_local_declarations_are_untouched() {
    let input = "func outer() {\n    func inner() {}\n    var x = 1\n}";
    let expected = "private func outer() {\n    func inner() {}\n    var x = 1\n}";
    assert_eq!(rewrite(input, force(AccessLevel::Private)), expected);
}

#[test]
fn test_local_declarations_in_member_bodies_are_untouched() {
    let input = "class A {\n    init() {\n        struct Local {}\n        let y = 2\n    }\n}";
    let expected = "public class A {\n    public init() {\n        struct Local {}\n        let y = 2\n    }\n}";
    assert_eq!(rewrite(input, AccessChange::set(AccessLevel::Public)), expected);
}

#[rstest]
#[case("if ready {\n    var x = 1\n}", "if ready {\n    public var x = 1\n}")]
#[case("foo { func bar() {} }", "foo { public func bar() {} }")]
#[case("for i in items {\n    let y = i\n}", "for i in items {\n    public let y = i\n}")]
fn test_declarations_in_statements_and_closures(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(rewrite(input, force(AccessLevel::Public)), expected);
}

#[test]
fn test_protocol_requirements_are_untouched() {
    let input = "protocol P {\n    func f()\n}";
    let expected = "public protocol P {\n    func f()\n}";
    assert_eq!(rewrite(input, force(AccessLevel::Public)), expected);
}

#[test]
fn test_enum_cases_are_untouched() {
    let input = "enum E {\n    case a\n    func f() {}\n}";
    let expected = "public enum E {\n    case a\n    public func f() {}\n}";
    assert_eq!(rewrite(input, force(AccessLevel::Public)), expected);
}

#[test]
fn test_conditional_members_are_untouched() {
    let input = "struct S {\n#if DEBUG\n    var a = 1\n#endif\n}";
    let expected = "public struct S {\n#if DEBUG\n    var a = 1\n#endif\n}";
    assert_eq!(rewrite(input, force(AccessLevel::Public)), expected);
}

#[test]
fn test_computed_property() {
    let input = "var x: Int {\n    return 1\n}";
    let expected = "public var x: Int {\n    return 1\n}";
    assert_eq!(rewrite(input, force(AccessLevel::Public)), expected);
}

#[test]
fn test_modifier_on_its_own_line_is_joined() {
    assert_eq!(
        rewrite("public\nfunc f() {}", AccessChange::DecreaseLevel),
        "package func f() {}"
    );
}
