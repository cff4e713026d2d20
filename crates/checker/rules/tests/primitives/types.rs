use forgecheck_model::{DeclKind, ModifierSet, Primitive};
use forgecheck_rules::primitives::{ensure_assignable, ensure_instance_of, ensure_same};

use crate::{assert_codes, render, with_context, ForgeProgram};

#[test]
fn test_instance_of_walks_supertypes() {
    let mut forge = ForgeProgram::new();
    let event = forge.event;
    let tick = forge.tick_event;
    let direct = forge.builder.class("com.example.Direct", &[event], ModifierSet::PUBLIC);
    let indirect = forge.builder.class("com.example.Indirect", &[tick], ModifierSet::PUBLIC);
    let unrelated = forge.builder.class("com.example.Unrelated", &[], ModifierSet::PUBLIC);
    let (program, profile) = forge.build();

    let (result, diagnostics) = with_context(&program, &profile, |cx| {
        ensure_instance_of(cx, direct, event)?;
        ensure_instance_of(cx, indirect, event)?;
        ensure_instance_of(cx, unrelated, event)
    });
    result.unwrap();
    insta::assert_snapshot!(render(&diagnostics), @"error[3001]: Class Unrelated needs to be a subtype of Event");
}

#[test]
fn test_instance_of_reports_declaration_kind() {
    let mut forge = ForgeProgram::new();
    let event = forge.event;
    let ty = forge.builder.declare_type("com.example.Listener", &[]);
    let interface = forge
        .builder
        .type_declaration(DeclKind::Interface, ty, ModifierSet::PUBLIC, None);
    let (program, profile) = forge.build();

    let (result, diagnostics) = with_context(&program, &profile, |cx| {
        ensure_instance_of(cx, interface, event)
    });
    result.unwrap();
    insta::assert_snapshot!(render(&diagnostics), @"error[3001]: Interface Listener needs to be a subtype of Event");
}

#[test]
fn test_assignable_direction() {
    let mut forge = ForgeProgram::new();
    let owner = forge.plain_class("com.example.ExampleMod");
    let base = forge.builder.declare_type("com.example.CommonProxy", &[]);
    let client = forge.builder.declare_type("com.example.ClientProxy", &[base]);
    let base_field = forge.builder.field(owner, "wide", ModifierSet::PUBLIC, base);
    let client_field = forge.builder.field(owner, "narrow", ModifierSet::PUBLIC, client);
    let (program, profile) = forge.build();

    let (result, diagnostics) = with_context(&program, &profile, |cx| {
        // a ClientProxy fits a CommonProxy field
        ensure_assignable(cx, base_field, client)?;
        // a CommonProxy does not fit a ClientProxy field
        ensure_assignable(cx, client_field, base)
    });
    result.unwrap();
    insta::assert_snapshot!(render(&diagnostics), @"error[3002]: Field narrow needs to be assignable to CommonProxy");
}

#[test]
fn test_assignable_boxes_primitives() {
    let mut forge = ForgeProgram::new();
    let owner = forge.plain_class("com.example.Holder");
    let object = forge.builder.object();
    let int = forge.builder.primitive(Primitive::Int);
    forge.builder.declare_type("java.lang.Integer", &[]);
    let field = forge.builder.field(owner, "anything", ModifierSet::PUBLIC, object);
    let (program, profile) = forge.build();

    let (result, diagnostics) = with_context(&program, &profile, |cx| {
        ensure_assignable(cx, field, int)
    });
    result.unwrap();
    assert_codes!(diagnostics, []);
}

#[test]
fn test_same_is_a_warning() {
    let mut forge = ForgeProgram::new();
    let owner = forge.plain_class("com.example.ExampleMod");
    let owner_type = forge.type_of("com.example.ExampleMod");
    let object = forge.builder.object();
    let exact = forge.builder.field(owner, "exact", ModifierSet::PUBLIC, owner_type);
    let loose = forge.builder.field(owner, "loose", ModifierSet::PUBLIC, object);
    let (program, profile) = forge.build();

    let (result, diagnostics) = with_context(&program, &profile, |cx| {
        ensure_same(cx, exact, owner_type)?;
        ensure_same(cx, loose, owner_type)
    });
    result.unwrap();
    assert!(!diagnostics.has_errors());
    insta::assert_snapshot!(render(&diagnostics), @"warning[4002]: Field loose should be of type ExampleMod");
}
