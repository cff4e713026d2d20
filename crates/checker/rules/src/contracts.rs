//! Per-tag rule sequences.

use forgecheck_diagnostics::Anchor;
use forgecheck_model::{DeclId, Modifier};

use crate::primitives::{
    ensure_assignable, ensure_class_exists, ensure_constructor, ensure_instance_of,
    ensure_modifier, ensure_number_of_elements, ensure_owner_annotation, ensure_parameters,
    ensure_return, ensure_same,
};
use crate::{CheckResult, Rule, RuleContext, TagKind};

pub(crate) const MOD: &[Rule] = &[
    |cx, decl| ensure_modifier(cx, decl, Modifier::Public, true),
    |cx, decl| ensure_modifier(cx, decl, Modifier::Abstract, false),
    |cx, decl| match cx.model.enclosing_of(decl)? {
        Some(_) => ensure_modifier(cx, decl, Modifier::Static, true),
        None => Ok(()),
    },
    |cx, decl| ensure_constructor(cx, decl, &[], None),
];

pub(crate) const EVENT_HANDLER: &[Rule] = &[
    |cx, decl| ensure_owner_annotation(cx, decl, TagKind::Mod),
    |cx, decl| ensure_modifier(cx, decl, Modifier::Public, true),
    |cx, decl| ensure_modifier(cx, decl, Modifier::Static, false),
    |cx, decl| ensure_parameters(cx, decl, &[cx.framework.fml_event]),
    |cx, decl| ensure_return(cx, decl, cx.framework.void),
];

pub(crate) const INSTANCE: &[Rule] = &[
    |cx, decl| ensure_owner_annotation(cx, decl, TagKind::Mod),
    |cx, decl| ensure_modifier(cx, decl, Modifier::Public, true),
    |cx, decl| ensure_modifier(cx, decl, Modifier::Static, true),
    |cx, decl| ensure_modifier(cx, decl, Modifier::Final, false),
    instance_type,
];

pub(crate) const METADATA: &[Rule] = &[
    |cx, decl| ensure_modifier(cx, decl, Modifier::Public, true),
    |cx, decl| ensure_modifier(cx, decl, Modifier::Static, false),
    |cx, decl| ensure_modifier(cx, decl, Modifier::Final, false),
    |cx, decl| ensure_assignable(cx, decl, cx.framework.mod_metadata),
];

pub(crate) const INSTANCE_FACTORY: &[Rule] = &[
    |cx, decl| ensure_owner_annotation(cx, decl, TagKind::Mod),
    |cx, decl| ensure_modifier(cx, decl, Modifier::Public, true),
    |cx, decl| ensure_modifier(cx, decl, Modifier::Static, true),
    |cx, decl| ensure_parameters(cx, decl, &[]),
    |cx, decl| ensure_return(cx, decl, cx.model.type_of(cx.owner(decl)?)?),
    |cx, decl| ensure_number_of_elements(cx, decl, TagKind::InstanceFactory, 1, 1),
];

pub(crate) const SIDED_PROXY: &[Rule] = &[
    |cx, decl| ensure_owner_annotation(cx, decl, TagKind::Mod),
    |cx, decl| ensure_modifier(cx, decl, Modifier::Public, true),
    |cx, decl| ensure_modifier(cx, decl, Modifier::Static, true),
    |cx, decl| ensure_modifier(cx, decl, Modifier::Final, false),
    proxy_classes,
];

pub(crate) const SUBSCRIBE_EVENT: &[Rule] = &[
    |cx, decl| ensure_modifier(cx, decl, Modifier::Public, true),
    |cx, decl| ensure_modifier(cx, decl, Modifier::Static, false),
    |cx, decl| ensure_modifier(cx, decl, Modifier::Final, false),
    |cx, decl| ensure_parameters(cx, decl, &[cx.framework.event]),
];

pub(crate) const CANCELABLE: &[Rule] = &[|cx, decl| ensure_instance_of(cx, decl, cx.framework.event)];

pub(crate) const HAS_RESULT: &[Rule] = &[|cx, decl| ensure_instance_of(cx, decl, cx.framework.event)];

pub(crate) const NETWORK_CHECK_HANDLER: &[Rule] = &[
    |cx, decl| ensure_modifier(cx, decl, Modifier::Public, true),
    |cx, decl| ensure_return(cx, decl, cx.framework.boolean),
    |cx, decl| ensure_parameters(cx, decl, &[cx.framework.string, cx.framework.side]),
];

/// An empty `value` means the instance is the enclosing mod itself, so the
/// field must hold that type.
fn instance_type(cx: &RuleContext<'_>, decl: DeclId) -> CheckResult {
    let attachment = cx.tag_attachment(decl, TagKind::Instance)?;
    let value = cx.model.attachment(attachment)?.str_value("value").unwrap_or_default();
    if !value.is_empty() {
        return Ok(());
    }
    let owner_type = cx.model.type_of(cx.owner(decl)?)?;
    ensure_assignable(cx, decl, owner_type)?;
    ensure_same(cx, decl, owner_type)
}

const PROXY_SIDES: [&str; 2] = ["clientSide", "serverSide"];

/// Both named proxy classes should resolve. Each one that does must fit the
/// field and have a public no-argument constructor.
fn proxy_classes(cx: &RuleContext<'_>, decl: DeclId) -> CheckResult {
    let attachment = cx.tag_attachment(decl, TagKind::SidedProxy)?;

    let mut resolved = Vec::with_capacity(PROXY_SIDES.len());
    for side in PROXY_SIDES {
        let tagged = cx.model.attachment(attachment)?;
        let named = match tagged.value(side) {
            None => "",
            Some(value) => value.as_str().unwrap_or_else(|| {
                tracing::debug!(side, ?value, "proxy class name is not a string, skipped");
                ""
            }),
        };
        if named.is_empty() {
            continue;
        }
        if let Some(ty) = ensure_class_exists(cx, decl, attachment, side)? {
            resolved.push((side, ty));
        }
    }

    for &(_, ty) in &resolved {
        ensure_assignable(cx, decl, ty)?;
    }

    for &(side, ty) in &resolved {
        match cx.model.declaration_of_type(ty) {
            Some(proxy) => ensure_constructor(
                cx,
                proxy,
                &[],
                Some(Anchor::Value(decl, attachment, side.to_string())),
            )?,
            None => tracing::warn!(
                side,
                proxy = cx.model.type_name(ty)?,
                "proxy class has no declaration in this round, constructor not checked"
            ),
        }
    }
    Ok(())
}
