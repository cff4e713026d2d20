//! # Constraint Primitives
//!
//! Each primitive tests exactly one structural fact. A failed check is
//! reported through the context's sink and the primitive still returns
//! `Ok`; `Err` is reserved for faults of the program model.

use forgecheck_diagnostics::{Anchor, DiagnosticCode};
use forgecheck_model::{AttachmentId, DeclId, DeclKind, Modifier, ProgramModel, TypeId};

use crate::{CheckResult, RuleContext, TagKind};

/// `decl` must carry `modifier` when `required`, and must not otherwise.
///
/// There is no "must not be public" diagnostic: forbidding `public` is a
/// no-op, as is any modifier outside public, static, final and abstract.
pub fn ensure_modifier(
    cx: &RuleContext<'_>,
    decl: DeclId,
    modifier: Modifier,
    required: bool,
) -> CheckResult {
    if cx.model.modifiers_of(decl)?.has(modifier) == required {
        return Ok(());
    }
    let code = match (modifier, required) {
        (Modifier::Public, true) => DiagnosticCode::NonPublic,
        (Modifier::Static, true) => DiagnosticCode::NonStatic,
        (Modifier::Static, false) => DiagnosticCode::Static,
        (Modifier::Final, true) => DiagnosticCode::NonFinal,
        (Modifier::Final, false) => DiagnosticCode::Final,
        (Modifier::Abstract, true) => DiagnosticCode::NonAbstract,
        (Modifier::Abstract, false) => DiagnosticCode::Abstract,
        _ => return Ok(()),
    };
    cx.report(code, &cx.model.describe(decl)?, "", decl.into());
    Ok(())
}

/// `type_decl` must declare a constructor taking `parameters`, which must be
/// public.
///
/// The first directly declared constructor whose parameters are positionally
/// subtypes of `parameters` is the match. `anchor` overrides where a missing
/// constructor is reported; it defaults to `type_decl`.
pub fn ensure_constructor(
    cx: &RuleContext<'_>,
    type_decl: DeclId,
    parameters: &[TypeId],
    anchor: Option<Anchor>,
) -> CheckResult {
    for &member in cx.model.members_of(type_decl)? {
        if cx.model.kind_of(member)? != DeclKind::Constructor {
            continue;
        }
        if signature_matches(cx.model, cx.model.parameters_of(member)?, parameters) {
            return ensure_modifier(cx, member, Modifier::Public, true);
        }
    }
    cx.report(
        DiagnosticCode::MissingConstructor,
        &cx.model.describe(type_decl)?,
        &render_parameters(cx.model, parameters)?,
        anchor.unwrap_or_else(|| type_decl.into()),
    );
    Ok(())
}

/// `method` must take exactly `parameters`, each actual a subtype of the
/// requested type at the same position.
pub fn ensure_parameters(cx: &RuleContext<'_>, method: DeclId, parameters: &[TypeId]) -> CheckResult {
    if signature_matches(cx.model, cx.model.parameters_of(method)?, parameters) {
        return Ok(());
    }
    cx.report(
        DiagnosticCode::InvalidParameters,
        &cx.model.describe(method)?,
        &render_parameters(cx.model, parameters)?,
        method.into(),
    );
    Ok(())
}

/// `method` must return exactly `expected`.
pub fn ensure_return(cx: &RuleContext<'_>, method: DeclId, expected: TypeId) -> CheckResult {
    if cx.model.is_same_type(cx.model.return_type_of(method)?, expected) {
        return Ok(());
    }
    cx.report(
        DiagnosticCode::InvalidReturn,
        &cx.model.describe(method)?,
        cx.model.type_name(expected)?,
        method.into(),
    );
    Ok(())
}

/// The type declared by `type_decl` must be a subtype of `supertype`.
pub fn ensure_instance_of(cx: &RuleContext<'_>, type_decl: DeclId, supertype: TypeId) -> CheckResult {
    if cx.model.is_subtype(cx.model.type_of(type_decl)?, supertype) {
        return Ok(());
    }
    cx.report(
        DiagnosticCode::NotSubtype,
        &cx.model.describe(type_decl)?,
        cx.model.simple_type_name(supertype)?,
        type_decl.into(),
    );
    Ok(())
}

/// A value of `ty` must be assignable to `decl`'s declared type.
///
/// `ty` is the source and `decl` the target, the reverse of
/// [`ensure_instance_of`].
pub fn ensure_assignable(cx: &RuleContext<'_>, decl: DeclId, ty: TypeId) -> CheckResult {
    if cx.model.is_assignable(ty, cx.model.type_of(decl)?) {
        return Ok(());
    }
    cx.report(
        DiagnosticCode::NotAssignable,
        &cx.model.describe(decl)?,
        cx.model.simple_type_name(ty)?,
        decl.into(),
    );
    Ok(())
}

/// `decl`'s declared type should be exactly `ty`. Advisory.
pub fn ensure_same(cx: &RuleContext<'_>, decl: DeclId, ty: TypeId) -> CheckResult {
    if cx.model.is_same_type(cx.model.type_of(decl)?, ty) {
        return Ok(());
    }
    cx.report(
        DiagnosticCode::NotSame,
        &cx.model.describe(decl)?,
        cx.model.simple_type_name(ty)?,
        decl.into(),
    );
    Ok(())
}

/// The declaration enclosing `decl` should carry `tag`. Advisory.
pub fn ensure_owner_annotation(cx: &RuleContext<'_>, decl: DeclId, tag: TagKind) -> CheckResult {
    if cx.carries(cx.owner(decl)?, tag)? {
        return Ok(());
    }
    cx.report(
        DiagnosticCode::MissingAnnotation,
        &cx.model.describe(decl)?,
        &format!("@{}", tag.simple_name()),
        decl.into(),
    );
    Ok(())
}

/// The qualified type name held in `value` of `attachment` should resolve.
///
/// A missing value reads as the empty name. Unresolved names are advisory:
/// the class may only exist on the framework's runtime classpath. Returns the
/// resolved type.
pub fn ensure_class_exists(
    cx: &RuleContext<'_>,
    decl: DeclId,
    attachment: AttachmentId,
    value: &str,
) -> CheckResult<Option<TypeId>> {
    let name = cx.model.attachment(attachment)?.str_value(value).unwrap_or_default();
    let resolved = cx.model.resolve_type_by_name(name);
    if resolved.is_none() {
        cx.report(
            DiagnosticCode::NotFound,
            &format!("Class {name}"),
            "",
            Anchor::Value(decl, attachment, value.to_string()),
        );
    }
    Ok(resolved)
}

/// The number of members of `decl`'s enclosing declaration carrying `tag`,
/// `decl` included, must lie in `low..=high`.
pub fn ensure_number_of_elements(
    cx: &RuleContext<'_>,
    decl: DeclId,
    tag: TagKind,
    low: usize,
    high: usize,
) -> CheckResult {
    let mut count = 0;
    for &sibling in cx.model.members_of(cx.owner(decl)?)? {
        if cx.carries(sibling, tag)? {
            count += 1;
        }
    }
    let code = if count < low {
        DiagnosticCode::NotEnough
    } else if count > high {
        DiagnosticCode::TooMany
    } else {
        return Ok(());
    };
    cx.report(
        code,
        &cx.model.describe(decl)?,
        &tag.annotation_name(cx.framework.profile()),
        decl.into(),
    );
    Ok(())
}

fn signature_matches(model: &dyn ProgramModel, actual: &[TypeId], requested: &[TypeId]) -> bool {
    actual.len() == requested.len()
        && actual
            .iter()
            .zip(requested)
            .all(|(&actual, &requested)| model.is_subtype(actual, requested))
}

/// `(T1, T2)` with qualified names.
fn render_parameters(model: &dyn ProgramModel, parameters: &[TypeId]) -> CheckResult<String> {
    let names = parameters
        .iter()
        .map(|&ty| model.type_name(ty))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("({})", names.join(", ")))
}
