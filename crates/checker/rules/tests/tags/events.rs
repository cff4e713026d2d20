use forgecheck_model::{DeclKind, ModifierSet};
use forgecheck_rules::TagKind;

use crate::{assert_clean, assert_codes, render, ForgeProgram};

#[test]
fn test_cancelable_event() {
    let mut forge = ForgeProgram::new();
    let tick = forge.tick_event;
    let event = forge
        .builder
        .class("com.example.PlayerJumpEvent", &[tick], ModifierSet::PUBLIC);
    forge.attach(event, TagKind::Cancelable);
    forge.attach(event, TagKind::HasResult);
    assert_clean!(forge.check());
}

#[test]
fn test_cancelable_non_event() {
    let mut forge = ForgeProgram::new();
    let class = forge.plain_class("com.example.NotAnEvent");
    forge.attach(class, TagKind::Cancelable);
    insta::assert_snapshot!(
        render(&forge.check()),
        @"error[3001]: Class NotAnEvent needs to be a subtype of Event"
    );
}

#[test]
fn test_has_result_non_event() {
    let mut forge = ForgeProgram::new();
    let fml_event = forge.fml_event;
    let class = forge
        .builder
        .class("com.example.LifecycleEvent", &[fml_event], ModifierSet::PUBLIC);
    forge.attach(class, TagKind::HasResult);
    assert_codes!(forge.check(), [NotSubtype]);
}

#[test]
fn test_cancelable_interface() {
    let mut forge = ForgeProgram::new();
    let event = forge.event;
    let ty = forge.builder.declare_type("com.example.Vetoable", &[event]);
    let decl = forge
        .builder
        .type_declaration(DeclKind::Interface, ty, ModifierSet::PUBLIC, None);
    forge.attach(decl, TagKind::Cancelable);
    assert_clean!(forge.check());
}
