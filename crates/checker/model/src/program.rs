//! In-memory program model.

use index_vec::IndexVec;
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::definition::{
    AttachmentId, DeclId, DeclKind, Primitive, SourceLocation, TypeId, TypeKind,
};
use crate::model::{ModelError, ModelResult, ProgramModel};
use crate::modifiers::ModifierSet;
use crate::value::{Attachment, Value};

pub const OBJECT: &str = "java.lang.Object";
pub const STRING: &str = "java.lang.String";
pub const VOID: &str = "void";

/// Name used for constructors, as the JVM spells it.
pub const CONSTRUCTOR_NAME: &str = "<init>";

#[derive(Debug, Clone)]
struct TypeData {
    name: String,
    kind: TypeKind,
    supertypes: Vec<TypeId>,
}

#[derive(Debug, Clone)]
struct DeclData {
    kind: DeclKind,
    name: String,
    ty: Option<TypeId>,
    modifiers: ModifierSet,
    enclosing: Option<DeclId>,
    members: Vec<DeclId>,
    parameters: Vec<TypeId>,
    returns: Option<TypeId>,
    attachments: Vec<AttachmentId>,
    location: Option<SourceLocation>,
}

/// A complete, immutable program for one round.
#[derive(Debug, Clone)]
pub struct Program {
    types: IndexVec<TypeId, TypeData>,
    type_names: FxHashMap<String, TypeId>,
    type_decls: FxHashMap<TypeId, DeclId>,
    decls: IndexVec<DeclId, DeclData>,
    attachments: IndexVec<AttachmentId, Attachment>,
    tagged: FxHashMap<TypeId, Vec<DeclId>>,
    object: TypeId,
    void: TypeId,
}

impl Program {
    pub fn declaration_count(&self) -> usize {
        self.decls.len()
    }

    pub fn declarations(&self) -> impl Iterator<Item = DeclId> + '_ {
        self.decls.indices()
    }

    fn decl(&self, decl: DeclId) -> ModelResult<&DeclData> {
        self.decls
            .get(decl)
            .ok_or(ModelError::UnknownDeclaration(decl))
    }

    fn type_kind(&self, ty: TypeId) -> Option<TypeKind> {
        self.types.get(ty).map(|data| data.kind)
    }

    fn boxed(&self, primitive: Primitive) -> Option<TypeId> {
        self.type_names.get(primitive.boxed_name()).copied()
    }

    /// Walks declared supertypes. Cycles in malformed input terminate.
    fn reaches(&self, from: TypeId, to: TypeId) -> bool {
        let mut visited = FxHashSet::default();
        let mut stack = vec![from];
        while let Some(ty) = stack.pop() {
            if ty == to {
                return true;
            }
            if !visited.insert(ty) {
                continue;
            }
            if let Some(data) = self.types.get(ty) {
                stack.extend(data.supertypes.iter().copied());
            }
        }
        false
    }

    fn executable(&self, decl: DeclId) -> ModelResult<&DeclData> {
        let data = self.decl(decl)?;
        if data.kind.is_executable() {
            Ok(data)
        } else {
            Err(ModelError::NotExecutable {
                kind: data.kind,
                name: data.name.clone(),
            })
        }
    }
}

impl ProgramModel for Program {
    fn declarations_with_tag(&self, annotation: TypeId) -> Vec<DeclId> {
        self.tagged.get(&annotation).cloned().unwrap_or_default()
    }

    fn kind_of(&self, decl: DeclId) -> ModelResult<DeclKind> {
        Ok(self.decl(decl)?.kind)
    }

    fn name_of(&self, decl: DeclId) -> ModelResult<&str> {
        Ok(&self.decl(decl)?.name)
    }

    fn type_of(&self, decl: DeclId) -> ModelResult<TypeId> {
        let data = self.decl(decl)?;
        data.ty.ok_or_else(|| ModelError::NoDeclaredType {
            kind: data.kind,
            name: data.name.clone(),
        })
    }

    fn modifiers_of(&self, decl: DeclId) -> ModelResult<ModifierSet> {
        Ok(self.decl(decl)?.modifiers)
    }

    fn enclosing_of(&self, decl: DeclId) -> ModelResult<Option<DeclId>> {
        Ok(self.decl(decl)?.enclosing)
    }

    fn members_of(&self, decl: DeclId) -> ModelResult<&[DeclId]> {
        Ok(&self.decl(decl)?.members)
    }

    fn parameters_of(&self, decl: DeclId) -> ModelResult<&[TypeId]> {
        Ok(&self.executable(decl)?.parameters)
    }

    fn return_type_of(&self, decl: DeclId) -> ModelResult<TypeId> {
        Ok(self.executable(decl)?.returns.unwrap_or(self.void))
    }

    fn attachments_of(&self, decl: DeclId) -> ModelResult<&[AttachmentId]> {
        Ok(&self.decl(decl)?.attachments)
    }

    fn attachment(&self, id: AttachmentId) -> ModelResult<&Attachment> {
        self.attachments
            .get(id)
            .ok_or(ModelError::UnknownAttachment(id))
    }

    fn declaration_of_type(&self, ty: TypeId) -> Option<DeclId> {
        self.type_decls.get(&ty).copied()
    }

    fn is_subtype(&self, sub: TypeId, sup: TypeId) -> bool {
        match (self.type_kind(sub), self.type_kind(sup)) {
            (Some(TypeKind::Void), Some(TypeKind::Void)) => true,
            (Some(TypeKind::Primitive(a)), Some(TypeKind::Primitive(b))) => a.widens_to(b),
            (Some(TypeKind::Declared), Some(TypeKind::Declared)) => {
                sup == self.object || self.reaches(sub, sup)
            }
            _ => false,
        }
    }

    fn is_assignable(&self, source: TypeId, target: TypeId) -> bool {
        if self.is_subtype(source, target) {
            return true;
        }
        match (self.type_kind(source), self.type_kind(target)) {
            // boxing, then widening reference conversion
            (Some(TypeKind::Primitive(primitive)), Some(TypeKind::Declared)) => self
                .boxed(primitive)
                .is_some_and(|boxed| self.is_subtype(boxed, target)),
            // unboxing, then widening primitive conversion
            (Some(TypeKind::Declared), Some(TypeKind::Primitive(unboxed))) => Primitive::ALL
                .into_iter()
                .any(|p| self.boxed(p) == Some(source) && p.widens_to(unboxed)),
            _ => false,
        }
    }

    fn is_same_type(&self, a: TypeId, b: TypeId) -> bool {
        a == b && self.type_kind(a).is_some()
    }

    fn resolve_type_by_name(&self, name: &str) -> Option<TypeId> {
        self.type_names.get(name).copied()
    }

    fn type_name(&self, ty: TypeId) -> ModelResult<&str> {
        self.types
            .get(ty)
            .map(|data| data.name.as_str())
            .ok_or(ModelError::UnknownType(ty))
    }

    fn location_of(&self, decl: DeclId) -> Option<&SourceLocation> {
        self.decls.get(decl)?.location.as_ref()
    }
}

/// Incrementally assembles a [`Program`].
///
/// Primitive types, `void`, `java.lang.Object` and `java.lang.String` are
/// registered up front.
#[derive(Debug, Clone)]
pub struct ProgramBuilder {
    program: Program,
}

impl Default for ProgramBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgramBuilder {
    pub fn new() -> Self {
        let mut builder = Self {
            program: Program {
                types: IndexVec::new(),
                type_names: FxHashMap::default(),
                type_decls: FxHashMap::default(),
                decls: IndexVec::new(),
                attachments: IndexVec::new(),
                tagged: FxHashMap::default(),
                object: TypeId::new(0),
                void: TypeId::new(0),
            },
        };
        builder.program.void = builder.register(VOID, TypeKind::Void);
        for primitive in Primitive::ALL {
            builder.register(primitive.name(), TypeKind::Primitive(primitive));
        }
        builder.program.object = builder.register(OBJECT, TypeKind::Declared);
        builder.register(STRING, TypeKind::Declared);
        builder
    }

    fn register(&mut self, name: &str, kind: TypeKind) -> TypeId {
        if let Some(&existing) = self.program.type_names.get(name) {
            return existing;
        }
        let id = self.program.types.push(TypeData {
            name: name.to_string(),
            kind,
            supertypes: Vec::new(),
        });
        self.program.type_names.insert(name.to_string(), id);
        id
    }

    pub fn lookup(&self, name: &str) -> Option<TypeId> {
        self.program.type_names.get(name).copied()
    }

    pub fn primitive(&self, primitive: Primitive) -> TypeId {
        // registered in `new`
        self.program.type_names[primitive.name()]
    }

    pub const fn void(&self) -> TypeId {
        self.program.void
    }

    pub const fn object(&self) -> TypeId {
        self.program.object
    }

    pub fn string(&self) -> TypeId {
        self.program.type_names[STRING]
    }

    /// Registers a declared reference type, or extends an existing one.
    pub fn declare_type(&mut self, name: &str, supertypes: &[TypeId]) -> TypeId {
        let id = self.register(name, TypeKind::Declared);
        for &sup in supertypes {
            self.add_supertype(id, sup);
        }
        id
    }

    pub fn add_supertype(&mut self, ty: TypeId, sup: TypeId) {
        if let Some(data) = self.program.types.get_mut(ty) {
            if !data.supertypes.contains(&sup) {
                data.supertypes.push(sup);
            }
        }
    }

    fn push_decl(&mut self, data: DeclData) -> DeclId {
        let enclosing = data.enclosing;
        let id = self.program.decls.push(data);
        if let Some(owner) = enclosing {
            self.program.decls[owner].members.push(id);
        }
        id
    }

    fn member(kind: DeclKind, name: &str, modifiers: ModifierSet, owner: Option<DeclId>) -> DeclData {
        DeclData {
            kind,
            name: name.to_string(),
            ty: None,
            modifiers,
            enclosing: owner,
            members: Vec::new(),
            parameters: Vec::new(),
            returns: None,
            attachments: Vec::new(),
            location: None,
        }
    }

    /// Declares a class, interface, enum or annotation type for `ty`.
    ///
    /// The simple name is the last segment of the type's qualified name.
    pub fn type_declaration(
        &mut self,
        kind: DeclKind,
        ty: TypeId,
        modifiers: ModifierSet,
        enclosing: Option<DeclId>,
    ) -> DeclId {
        debug_assert!(kind.is_type(), "{kind} is not a type declaration");
        let qualified = &self.program.types[ty].name;
        let simple = qualified.rsplit('.').next().unwrap_or(qualified).to_string();
        let mut data = Self::member(kind, &simple, modifiers, enclosing);
        data.ty = Some(ty);
        let id = self.push_decl(data);
        self.program.type_decls.insert(ty, id);
        id
    }

    /// Declares a top-level class for a new type with the given supertypes.
    pub fn class(&mut self, name: &str, supertypes: &[TypeId], modifiers: ModifierSet) -> DeclId {
        let ty = self.declare_type(name, supertypes);
        self.type_declaration(DeclKind::Class, ty, modifiers, None)
    }

    /// Declares a class nested in `owner`; `name` is the qualified name.
    pub fn nested_class(
        &mut self,
        owner: DeclId,
        name: &str,
        supertypes: &[TypeId],
        modifiers: ModifierSet,
    ) -> DeclId {
        let ty = self.declare_type(name, supertypes);
        self.type_declaration(DeclKind::Class, ty, modifiers, Some(owner))
    }

    pub fn method(
        &mut self,
        owner: DeclId,
        name: &str,
        modifiers: ModifierSet,
        parameters: &[TypeId],
        returns: TypeId,
    ) -> DeclId {
        let mut data = Self::member(DeclKind::Method, name, modifiers, Some(owner));
        data.parameters = parameters.to_vec();
        data.returns = Some(returns);
        self.push_decl(data)
    }

    pub fn constructor(
        &mut self,
        owner: DeclId,
        modifiers: ModifierSet,
        parameters: &[TypeId],
    ) -> DeclId {
        let mut data = Self::member(DeclKind::Constructor, CONSTRUCTOR_NAME, modifiers, Some(owner));
        data.parameters = parameters.to_vec();
        self.push_decl(data)
    }

    pub fn field(&mut self, owner: DeclId, name: &str, modifiers: ModifierSet, ty: TypeId) -> DeclId {
        let mut data = Self::member(DeclKind::Field, name, modifiers, Some(owner));
        data.ty = Some(ty);
        self.push_decl(data)
    }

    pub fn attach(&mut self, decl: DeclId, annotation: TypeId) -> AttachmentId {
        self.attach_with(decl, annotation, IndexMap::new())
    }

    pub fn attach_with(
        &mut self,
        decl: DeclId,
        annotation: TypeId,
        values: IndexMap<String, Value>,
    ) -> AttachmentId {
        let mut attachment = Attachment::new(decl, annotation);
        attachment.values = values;
        let id = self.program.attachments.push(attachment);
        self.program.decls[decl].attachments.push(id);

        let tagged = self.program.tagged.entry(annotation).or_default();
        if tagged.last() != Some(&decl) {
            tagged.push(decl);
        }
        id
    }

    pub fn set_location(&mut self, decl: DeclId, location: SourceLocation) {
        self.program.decls[decl].location = Some(location);
    }

    pub fn set_attachment_location(
        &mut self,
        id: AttachmentId,
        location: Option<SourceLocation>,
        value_locations: impl IntoIterator<Item = (String, SourceLocation)>,
    ) {
        let attachment = &mut self.program.attachments[id];
        attachment.location = location;
        attachment.value_locations.extend(value_locations);
    }

    pub fn build(self) -> Program {
        self.program
    }
}
