use forgecheck_model::{DeclKind, ModifierSet};
use forgecheck_rules::TagKind;

use crate::{assert_clean, assert_codes, render, ForgeProgram};

#[test]
fn test_valid_mod() {
    let mut forge = ForgeProgram::new();
    forge.mod_class("com.example.ExampleMod");
    assert_clean!(forge.check());
}

#[test]
fn test_every_mod_rule_fails() {
    let mut forge = ForgeProgram::new();
    let outer = forge.plain_class("com.example.Outer");
    let inner = forge.builder.nested_class(
        outer,
        "com.example.Outer.Inner",
        &[],
        ModifierSet::ABSTRACT,
    );
    forge.attach(inner, TagKind::Mod);

    let diagnostics = forge.check();
    insta::assert_snapshot!(render(&diagnostics), @r"
    error[1001]: Class Inner must be public
    error[1006]: Class Inner cannot be abstract
    error[1003]: Class Inner must be static
    error[2001]: Class Inner is missing required constructor with parameters ()
    ");
}

#[test]
fn test_static_nested_mod() {
    let mut forge = ForgeProgram::new();
    let outer = forge.plain_class("com.example.Outer");
    let inner = forge.builder.nested_class(
        outer,
        "com.example.Outer.Inner",
        &[],
        ModifierSet::PUBLIC | ModifierSet::STATIC,
    );
    forge.builder.constructor(inner, ModifierSet::PUBLIC, &[]);
    forge.attach(inner, TagKind::Mod);
    assert_clean!(forge.check());
}

#[test]
fn test_mod_constructor_must_be_public() {
    let mut forge = ForgeProgram::new();
    let class = forge.builder.class("com.example.ExampleMod", &[], ModifierSet::PUBLIC);
    forge.builder.constructor(class, ModifierSet::PROTECTED, &[]);
    forge.attach(class, TagKind::Mod);
    assert_codes!(forge.check(), [NonPublic]);
}

#[test]
fn test_mod_with_only_argument_constructors() {
    let mut forge = ForgeProgram::new();
    let string = forge.builder.string();
    let class = forge.builder.class("com.example.ExampleMod", &[], ModifierSet::PUBLIC);
    forge.builder.constructor(class, ModifierSet::PUBLIC, &[string]);
    forge.attach(class, TagKind::Mod);
    assert_codes!(forge.check(), [MissingConstructor]);
}

#[test]
fn test_mod_on_enum() {
    let mut forge = ForgeProgram::new();
    let ty = forge.builder.declare_type("com.example.Singleton", &[]);
    let decl = forge
        .builder
        .type_declaration(DeclKind::Enum, ty, ModifierSet::PUBLIC, None);
    forge.attach(decl, TagKind::Mod);
    insta::assert_snapshot!(
        render(&forge.check()),
        @"error[2001]: Enum Singleton is missing required constructor with parameters ()"
    );
}
