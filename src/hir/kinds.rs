//! Declaration kinds and their structural capabilities.
//!
//! Everything the traversal needs to know about a kind lives in one table:
//! what a fragment promotes into, whether the kind can be requested as a
//! root, and what kind of binding site its name is.

use serde::{Deserialize, Serialize};

use super::model::BindingKind;

/// The syntactic kind of a declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclKind {
    Function,
    Class,
    Interface,
    TypeAlias,
    Enum,
    Namespace,
    /// A `const`/`let`/`var` statement binding one or more names.
    VariableGroup,
    /// One declarator inside a [`DeclKind::VariableGroup`].
    Variable,
    /// A name bound by a destructuring pattern.
    BindingElement,
    Property,
    Method,
    Constructor,
    Accessor,
    PropertySignature,
    MethodSignature,
    EnumMember,
    Parameter,
    TypeParameter,
}

/// How a declaration of some kind relates to its structural parent.
#[derive(Debug)]
pub enum Promotion {
    /// Promoted only when the parent has one of these kinds.
    Into(&'static [DeclKind]),
    /// Never stands alone: promoted into whatever declaration encloses it
    /// (class or type-literal members, object-literal properties,
    /// parameters).
    Enclosing,
}

/// Capabilities of one [`DeclKind`].
#[derive(Debug)]
pub struct KindInfo {
    pub kind: DeclKind,
    pub promotion: Promotion,
    /// Whether a top-level declaration of this kind can be a slicing root.
    pub root: bool,
    /// The binding site its own name represents.
    pub name_binding: BindingKind,
}

const NAMESPACE: Promotion = Promotion::Into(&[DeclKind::Namespace]);
const DECLARATOR: Promotion = Promotion::Into(&[DeclKind::VariableGroup]);
const PATTERN: Promotion = Promotion::Into(&[DeclKind::Variable, DeclKind::BindingElement]);

// Indexed by `DeclKind as usize`; order must follow the enum.
static KIND_TABLE: [KindInfo; 18] = [
    KindInfo {
        kind: DeclKind::Function,
        promotion: NAMESPACE,
        root: true,
        name_binding: BindingKind::DeclarationName,
    },
    KindInfo {
        kind: DeclKind::Class,
        promotion: NAMESPACE,
        root: true,
        name_binding: BindingKind::DeclarationName,
    },
    KindInfo {
        kind: DeclKind::Interface,
        promotion: NAMESPACE,
        root: true,
        name_binding: BindingKind::DeclarationName,
    },
    KindInfo {
        kind: DeclKind::TypeAlias,
        promotion: NAMESPACE,
        root: true,
        name_binding: BindingKind::DeclarationName,
    },
    KindInfo {
        kind: DeclKind::Enum,
        promotion: NAMESPACE,
        root: true,
        name_binding: BindingKind::DeclarationName,
    },
    KindInfo {
        kind: DeclKind::Namespace,
        promotion: NAMESPACE,
        root: true,
        name_binding: BindingKind::DeclarationName,
    },
    KindInfo {
        kind: DeclKind::VariableGroup,
        promotion: NAMESPACE,
        root: true,
        name_binding: BindingKind::DeclarationName,
    },
    KindInfo {
        kind: DeclKind::Variable,
        promotion: DECLARATOR,
        root: false,
        name_binding: BindingKind::DeclarationName,
    },
    KindInfo {
        kind: DeclKind::BindingElement,
        promotion: PATTERN,
        root: false,
        name_binding: BindingKind::Destructuring,
    },
    KindInfo {
        kind: DeclKind::Property,
        promotion: Promotion::Enclosing,
        root: false,
        name_binding: BindingKind::Member,
    },
    KindInfo {
        kind: DeclKind::Method,
        promotion: Promotion::Enclosing,
        root: false,
        name_binding: BindingKind::Member,
    },
    KindInfo {
        kind: DeclKind::Constructor,
        promotion: Promotion::Enclosing,
        root: false,
        name_binding: BindingKind::Member,
    },
    KindInfo {
        kind: DeclKind::Accessor,
        promotion: Promotion::Enclosing,
        root: false,
        name_binding: BindingKind::Member,
    },
    KindInfo {
        kind: DeclKind::PropertySignature,
        promotion: Promotion::Enclosing,
        root: false,
        name_binding: BindingKind::Member,
    },
    KindInfo {
        kind: DeclKind::MethodSignature,
        promotion: Promotion::Enclosing,
        root: false,
        name_binding: BindingKind::Member,
    },
    KindInfo {
        kind: DeclKind::EnumMember,
        promotion: Promotion::Enclosing,
        root: false,
        name_binding: BindingKind::Member,
    },
    KindInfo {
        kind: DeclKind::Parameter,
        promotion: Promotion::Enclosing,
        root: false,
        name_binding: BindingKind::Parameter,
    },
    KindInfo {
        kind: DeclKind::TypeParameter,
        promotion: Promotion::Enclosing,
        root: false,
        name_binding: BindingKind::TypeParameter,
    },
];

impl DeclKind {
    /// Look up the capabilities of this kind.
    pub fn info(self) -> &'static KindInfo {
        &KIND_TABLE[self as usize]
    }

    /// Whether a declaration of this kind nested directly in `parent` is a
    /// fragment of it.
    pub fn is_fragment_of(self, parent: DeclKind) -> bool {
        match self.info().promotion {
            Promotion::Into(containers) => containers.contains(&parent),
            Promotion::Enclosing => true,
        }
    }

    /// Whether this kind can be requested as a root.
    pub fn is_root_candidate(self) -> bool {
        self.info().root
    }

    /// Kinds whose descendants bind names into the enclosing scope rather
    /// than their own.
    pub fn binds_through(self) -> bool {
        matches!(
            self,
            DeclKind::VariableGroup | DeclKind::Variable | DeclKind::BindingElement
        )
    }
}
