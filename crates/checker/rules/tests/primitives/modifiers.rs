use forgecheck_diagnostics::DiagnosticCollection;
use forgecheck_model::{Modifier, ModifierSet};
use forgecheck_rules::primitives::ensure_modifier;

use crate::{assert_codes, with_context, ForgeProgram};

/// Runs `ensure_modifier` against a class declared with `modifiers`.
fn check(modifiers: ModifierSet, modifier: Modifier, required: bool) -> DiagnosticCollection {
    let mut forge = ForgeProgram::new();
    let class = forge.builder.class("com.example.Target", &[], modifiers);
    let (program, profile) = forge.build();
    let (result, diagnostics) = with_context(&program, &profile, |cx| {
        ensure_modifier(cx, class, modifier, required)
    });
    result.expect("no model fault");
    diagnostics
}

#[test]
fn test_required_modifier_present() {
    let diagnostics = check(ModifierSet::PUBLIC | ModifierSet::STATIC, Modifier::Static, true);
    assert_codes!(diagnostics, []);
}

#[test]
fn test_required_modifier_absent() {
    assert_codes!(check(ModifierSet::empty(), Modifier::Public, true), [NonPublic]);
    assert_codes!(check(ModifierSet::empty(), Modifier::Static, true), [NonStatic]);
    assert_codes!(check(ModifierSet::empty(), Modifier::Final, true), [NonFinal]);
    assert_codes!(check(ModifierSet::empty(), Modifier::Abstract, true), [NonAbstract]);
}

#[test]
fn test_forbidden_modifier_present() {
    assert_codes!(check(ModifierSet::STATIC, Modifier::Static, false), [Static]);
    assert_codes!(check(ModifierSet::FINAL, Modifier::Final, false), [Final]);
    assert_codes!(check(ModifierSet::ABSTRACT, Modifier::Abstract, false), [Abstract]);
}

#[test]
fn test_forbidding_public_is_a_no_op() {
    assert_codes!(check(ModifierSet::PUBLIC, Modifier::Public, false), []);
}

#[test]
fn test_unchecked_modifiers_never_report() {
    assert_codes!(check(ModifierSet::empty(), Modifier::Volatile, true), []);
    assert_codes!(check(ModifierSet::PRIVATE, Modifier::Private, false), []);
}

#[test]
fn test_message_names_the_declaration() {
    let diagnostics = check(ModifierSet::FINAL, Modifier::Final, false);
    insta::assert_snapshot!(crate::render(&diagnostics), @"error[1004]: Class Target cannot be final");
}
