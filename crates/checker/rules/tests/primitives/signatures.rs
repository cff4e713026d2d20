use forgecheck_diagnostics::Anchor;
use forgecheck_model::{AttachmentId, ModifierSet, Primitive};
use forgecheck_rules::primitives::{ensure_constructor, ensure_parameters, ensure_return};

use crate::{assert_codes, render, with_context, ForgeProgram};

#[test]
fn test_constructor_found_and_public() {
    let mut forge = ForgeProgram::new();
    let class = forge.plain_class("com.example.Proxy");
    let (program, profile) = forge.build();

    let (result, diagnostics) = with_context(&program, &profile, |cx| {
        ensure_constructor(cx, class, &[], None)
    });
    result.unwrap();
    assert_codes!(diagnostics, []);
}

#[test]
fn test_constructor_found_but_not_public() {
    let mut forge = ForgeProgram::new();
    let class = forge.builder.class("com.example.Proxy", &[], ModifierSet::PUBLIC);
    forge.builder.constructor(class, ModifierSet::PRIVATE, &[]);
    let (program, profile) = forge.build();

    let (result, diagnostics) = with_context(&program, &profile, |cx| {
        ensure_constructor(cx, class, &[], None)
    });
    result.unwrap();
    insta::assert_snapshot!(render(&diagnostics), @"error[1001]: Constructor <init> must be public");
}

#[test]
fn test_constructor_missing() {
    let mut forge = ForgeProgram::new();
    let string = forge.builder.string();
    let class = forge.builder.class("com.example.Proxy", &[], ModifierSet::PUBLIC);
    forge.builder.constructor(class, ModifierSet::PUBLIC, &[string]);
    let int = forge.builder.primitive(Primitive::Int);
    let (program, profile) = forge.build();

    let (result, diagnostics) = with_context(&program, &profile, |cx| {
        ensure_constructor(cx, class, &[], None)?;
        ensure_constructor(cx, class, &[string, int], None)
    });
    result.unwrap();
    insta::assert_snapshot!(render(&diagnostics), @r"
    error[2001]: Class Proxy is missing required constructor with parameters ()
    error[2001]: Class Proxy is missing required constructor with parameters (java.lang.String, int)
    ");
    assert!(diagnostics.iter().all(|d| d.anchor == Anchor::Declaration(class)));
}

#[test]
fn test_constructor_parameters_match_by_subtype() {
    let mut forge = ForgeProgram::new();
    let object = forge.builder.object();
    let string = forge.builder.string();
    let class = forge.builder.class("com.example.Proxy", &[], ModifierSet::PUBLIC);
    forge.builder.constructor(class, ModifierSet::PUBLIC, &[string]);
    let other = forge.builder.class("com.example.Other", &[], ModifierSet::PUBLIC);
    forge.builder.constructor(other, ModifierSet::PUBLIC, &[object]);
    let (program, profile) = forge.build();

    let (result, diagnostics) = with_context(&program, &profile, |cx| {
        // String <: Object
        ensure_constructor(cx, class, &[object], None)?;
        // Object is not a String
        ensure_constructor(cx, other, &[string], None)
    });
    result.unwrap();
    assert_codes!(diagnostics, [MissingConstructor]);
    assert_eq!(diagnostics.all()[0].anchor, Anchor::Declaration(other));
}

#[test]
fn test_constructor_anchor_override() {
    let mut forge = ForgeProgram::new();
    let class = forge.builder.class("com.example.Proxy", &[], ModifierSet::PUBLIC);
    let (program, profile) = forge.build();
    let anchor = Anchor::Value(class, AttachmentId::new(0), "clientSide".to_string());

    let (result, diagnostics) = with_context(&program, &profile, |cx| {
        ensure_constructor(cx, class, &[], Some(anchor.clone()))
    });
    result.unwrap();
    assert_eq!(diagnostics.all()[0].anchor, anchor);
}

#[test]
fn test_parameters() {
    let mut forge = ForgeProgram::new();
    let owner = forge.plain_class("com.example.Handlers");
    let void = forge.builder.void();
    let object = forge.builder.object();
    let (event, init_event) = (forge.fml_event, forge.init_event);
    let exact = forge.builder.method(owner, "exact", ModifierSet::PUBLIC, &[event], void);
    let narrower = forge.builder.method(owner, "narrower", ModifierSet::PUBLIC, &[init_event], void);
    let wider = forge.builder.method(owner, "wider", ModifierSet::PUBLIC, &[object], void);
    let extra = forge.builder.method(owner, "extra", ModifierSet::PUBLIC, &[event, event], void);
    let none = forge.builder.method(owner, "none", ModifierSet::PUBLIC, &[], void);
    let (program, profile) = forge.build();

    let (result, diagnostics) = with_context(&program, &profile, |cx| {
        for method in [exact, narrower, wider, extra, none] {
            ensure_parameters(cx, method, &[event])?;
        }
        ensure_parameters(cx, none, &[])
    });
    result.unwrap();
    insta::assert_snapshot!(render(&diagnostics), @r"
    error[2002]: Method wider has invalid parameters. Must be (net.minecraftforge.fml.common.event.FMLEvent)
    error[2002]: Method extra has invalid parameters. Must be (net.minecraftforge.fml.common.event.FMLEvent)
    error[2002]: Method none has invalid parameters. Must be (net.minecraftforge.fml.common.event.FMLEvent)
    ");
}

#[test]
fn test_return_requires_identity() {
    let mut forge = ForgeProgram::new();
    let owner = forge.plain_class("com.example.Handlers");
    let boolean = forge.builder.primitive(Primitive::Boolean);
    let boxed = forge.builder.declare_type("java.lang.Boolean", &[]);
    let int = forge.builder.primitive(Primitive::Int);
    let exact = forge.builder.method(owner, "exact", ModifierSet::PUBLIC, &[], boolean);
    let wrapper = forge.builder.method(owner, "wrapper", ModifierSet::PUBLIC, &[], boxed);
    let wrong = forge.builder.method(owner, "wrong", ModifierSet::PUBLIC, &[], int);
    let (program, profile) = forge.build();

    let (result, diagnostics) = with_context(&program, &profile, |cx| {
        ensure_return(cx, exact, boolean)?;
        ensure_return(cx, wrapper, boolean)?;
        ensure_return(cx, wrong, boolean)
    });
    result.unwrap();
    insta::assert_snapshot!(render(&diagnostics), @r"
    error[2003]: Method wrapper has an invalid return type. Must be boolean
    error[2003]: Method wrong has an invalid return type. Must be boolean
    ");
}

#[test]
fn test_parameters_of_a_field_is_a_fault() {
    let mut forge = ForgeProgram::new();
    let owner = forge.plain_class("com.example.Holder");
    let object = forge.builder.object();
    let field = forge.builder.field(owner, "value", ModifierSet::PUBLIC, object);
    let (program, profile) = forge.build();

    let (result, diagnostics) = with_context(&program, &profile, |cx| {
        ensure_parameters(cx, field, &[])
    });
    assert!(result.is_err());
    assert!(diagnostics.is_empty());
}
