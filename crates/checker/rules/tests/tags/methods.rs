use forgecheck_model::{ModifierSet, Primitive};
use forgecheck_rules::TagKind;

use crate::{assert_clean, assert_codes, render, ForgeProgram};

const MOD: &str = "com.example.ExampleMod";

// ===== EventHandler =====

#[test]
fn test_valid_event_handler() {
    let mut forge = ForgeProgram::new();
    let owner = forge.mod_class(MOD);
    let (void, init) = (forge.builder.void(), forge.init_event);
    let handler = forge
        .builder
        .method(owner, "init", ModifierSet::PUBLIC, &[init], void);
    forge.attach(handler, TagKind::EventHandler);
    assert_clean!(forge.check());
}

#[test]
fn test_event_handler_violations() {
    let mut forge = ForgeProgram::new();
    let owner = forge.plain_class("com.example.NotAMod");
    let tick = forge.tick_event;
    let int = forge.builder.primitive(Primitive::Int);
    let handler = forge.builder.method(owner, "init", ModifierSet::STATIC, &[tick], int);
    forge.attach(handler, TagKind::EventHandler);
    insta::assert_snapshot!(render(&forge.check()), @r"
    warning[4003]: Method init's owner should be annotated with @Mod
    error[1001]: Method init must be public
    error[1002]: Method init cannot be static
    error[2002]: Method init has invalid parameters. Must be (net.minecraftforge.fml.common.event.FMLEvent)
    error[2003]: Method init has an invalid return type. Must be void
    ");
}

// ===== InstanceFactory =====

#[test]
fn test_valid_instance_factory() {
    let mut forge = ForgeProgram::new();
    let owner = forge.mod_class(MOD);
    let owner_type = forge.type_of(MOD);
    let factory = forge.builder.method(
        owner,
        "create",
        ModifierSet::PUBLIC | ModifierSet::STATIC,
        &[],
        owner_type,
    );
    forge.attach(factory, TagKind::InstanceFactory);
    assert_clean!(forge.check());
}

#[test]
fn test_instance_factory_violations() {
    let mut forge = ForgeProgram::new();
    let owner = forge.mod_class(MOD);
    let object = forge.builder.object();
    let string = forge.builder.string();
    let factory = forge
        .builder
        .method(owner, "create", ModifierSet::PUBLIC, &[string], object);
    forge.attach(factory, TagKind::InstanceFactory);
    insta::assert_snapshot!(render(&forge.check()), @r"
    error[1003]: Method create must be static
    error[2002]: Method create has invalid parameters. Must be ()
    error[2003]: Method create has an invalid return type. Must be com.example.ExampleMod
    ");
}

#[test]
fn test_two_instance_factories_both_report() {
    let mut forge = ForgeProgram::new();
    let owner = forge.mod_class(MOD);
    let owner_type = forge.type_of(MOD);
    for name in ["create", "createAgain"] {
        let factory = forge.builder.method(
            owner,
            name,
            ModifierSet::PUBLIC | ModifierSet::STATIC,
            &[],
            owner_type,
        );
        forge.attach(factory, TagKind::InstanceFactory);
    }
    assert_codes!(forge.check(), [TooMany, TooMany]);
}

// ===== SubscribeEvent =====

#[test]
fn test_valid_subscriber() {
    let mut forge = ForgeProgram::new();
    let owner = forge.plain_class("com.example.Listener");
    let (void, tick) = (forge.builder.void(), forge.tick_event);
    let subscriber = forge
        .builder
        .method(owner, "onTick", ModifierSet::PUBLIC, &[tick], void);
    forge.attach(subscriber, TagKind::SubscribeEvent);
    assert_clean!(forge.check());
}

#[test]
fn test_subscriber_violations() {
    let mut forge = ForgeProgram::new();
    let owner = forge.plain_class("com.example.Listener");
    let (void, init) = (forge.builder.void(), forge.init_event);
    let subscriber = forge.builder.method(
        owner,
        "onInit",
        ModifierSet::STATIC | ModifierSet::FINAL,
        &[init],
        void,
    );
    forge.attach(subscriber, TagKind::SubscribeEvent);
    insta::assert_snapshot!(render(&forge.check()), @r"
    error[1001]: Method onInit must be public
    error[1002]: Method onInit cannot be static
    error[1004]: Method onInit cannot be final
    error[2002]: Method onInit has invalid parameters. Must be (net.minecraftforge.fml.common.eventhandler.Event)
    ");
}

// ===== NetworkCheckHandler =====

#[test]
fn test_valid_network_check_handler() {
    let mut forge = ForgeProgram::new();
    let owner = forge.mod_class(MOD);
    let boolean = forge.builder.primitive(Primitive::Boolean);
    let (string, side) = (forge.builder.string(), forge.side);
    let handler = forge.builder.method(
        owner,
        "checkRemote",
        ModifierSet::PUBLIC,
        &[string, side],
        boolean,
    );
    forge.attach(handler, TagKind::NetworkCheckHandler);
    assert_clean!(forge.check());
}

#[test]
fn test_network_check_handler_parameter_order() {
    let mut forge = ForgeProgram::new();
    let owner = forge.mod_class(MOD);
    let boolean = forge.builder.primitive(Primitive::Boolean);
    let (string, side) = (forge.builder.string(), forge.side);
    let handler = forge
        .builder
        .method(owner, "checkRemote", ModifierSet::empty(), &[side, string], boolean);
    forge.attach(handler, TagKind::NetworkCheckHandler);
    insta::assert_snapshot!(render(&forge.check()), @r"
    error[1001]: Method checkRemote must be public
    error[2002]: Method checkRemote has invalid parameters. Must be (java.lang.String, net.minecraftforge.fml.relauncher.Side)
    ");
}
