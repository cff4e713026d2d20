//! The recognized tag catalog.

use std::fmt;

use forgecheck_model::{DeclId, DeclKind};

use crate::contracts;
use crate::{CheckResult, FrameworkProfile, RuleContext};

/// One step of a tag's contract.
pub type Rule = fn(&RuleContext<'_>, DeclId) -> CheckResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Mod,
    EventHandler,
    Instance,
    Metadata,
    InstanceFactory,
    SidedProxy,
    SubscribeEvent,
    Cancelable,
    HasResult,
    NetworkCheckHandler,
}

impl TagKind {
    pub const COUNT: usize = 10;

    /// Every tag, in the order a round visits them.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Mod,
        Self::EventHandler,
        Self::Instance,
        Self::Metadata,
        Self::InstanceFactory,
        Self::SidedProxy,
        Self::SubscribeEvent,
        Self::Cancelable,
        Self::HasResult,
        Self::NetworkCheckHandler,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn simple_name(self) -> &'static str {
        match self {
            Self::Mod => "Mod",
            Self::EventHandler => "EventHandler",
            Self::Instance => "Instance",
            Self::Metadata => "Metadata",
            Self::InstanceFactory => "InstanceFactory",
            Self::SidedProxy => "SidedProxy",
            Self::SubscribeEvent => "SubscribeEvent",
            Self::Cancelable => "Cancelable",
            Self::HasResult => "HasResult",
            Self::NetworkCheckHandler => "NetworkCheckHandler",
        }
    }

    /// Path of the annotation below `<package>.fml.common`.
    const fn common_path(self) -> &'static str {
        match self {
            Self::Mod => "Mod",
            Self::EventHandler => "Mod.EventHandler",
            Self::Instance => "Mod.Instance",
            Self::Metadata => "Mod.Metadata",
            Self::InstanceFactory => "Mod.InstanceFactory",
            Self::SidedProxy => "SidedProxy",
            Self::SubscribeEvent => "eventhandler.SubscribeEvent",
            Self::Cancelable => "eventhandler.Cancelable",
            Self::HasResult => "eventhandler.Event.HasResult",
            Self::NetworkCheckHandler => "network.NetworkCheckHandler",
        }
    }

    /// Qualified name of the annotation type under `profile`.
    pub fn annotation_name(self, profile: &FrameworkProfile) -> String {
        profile.common(self.common_path())
    }

    /// Whether the tag may be placed on a declaration of `kind`.
    pub const fn accepts(self, kind: DeclKind) -> bool {
        match self {
            Self::Mod | Self::Cancelable | Self::HasResult => kind.is_type(),
            Self::EventHandler
            | Self::InstanceFactory
            | Self::SubscribeEvent
            | Self::NetworkCheckHandler => matches!(kind, DeclKind::Method),
            Self::Instance | Self::Metadata | Self::SidedProxy => matches!(kind, DeclKind::Field),
        }
    }

    /// The ordered contract run for every declaration carrying this tag.
    pub const fn rules(self) -> &'static [Rule] {
        match self {
            Self::Mod => contracts::MOD,
            Self::EventHandler => contracts::EVENT_HANDLER,
            Self::Instance => contracts::INSTANCE,
            Self::Metadata => contracts::METADATA,
            Self::InstanceFactory => contracts::INSTANCE_FACTORY,
            Self::SidedProxy => contracts::SIDED_PROXY,
            Self::SubscribeEvent => contracts::SUBSCRIBE_EVENT,
            Self::Cancelable => contracts::CANCELABLE,
            Self::HasResult => contracts::HAS_RESULT,
            Self::NetworkCheckHandler => contracts::NETWORK_CHECK_HANDLER,
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.simple_name())
    }
}
