use std::fmt::{Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

use crate::constants::PACKAGE_LIFECYCLE;

/// When a hook fires relative to its lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPhase {
    Before,
    At,
    After,
}

impl HookPhase {
    pub fn prefix(self) -> Option<&'static str> {
        match self {
            Self::Before => Some("before"),
            Self::At => None,
            Self::After => Some("after"),
        }
    }
}

/// A single hookable point in a command lifecycle, e.g.
/// `before:package:createDeploymentArtifacts`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LifecycleEvent {
    pub phase: HookPhase,
    /// Command path, possibly nested (`deploy:function`).
    pub command: String,
    pub event: String,
}

impl LifecycleEvent {
    pub fn new(phase: HookPhase, command: &str, event: &str) -> Self {
        Self {
            phase,
            command: command.to_string(),
            event: event.to_string(),
        }
    }

    pub fn canonical(&self) -> String {
        match self.phase.prefix() {
            Some(prefix) => format!("{}:{}:{}", prefix, self.command, self.event),
            None => format!("{}:{}", self.command, self.event),
        }
    }

    /// Returns true if the event belongs to a lifecycle this host knows how to run.
    pub fn is_known(&self) -> bool {
        lifecycle_events(&self.command)
            .map(|events| events.contains(&self.event.as_str()))
            .unwrap_or(false)
    }
}

impl Display for LifecycleEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LifecycleParseError {
    #[error("lifecycle event must not be empty")]
    Empty,
    #[error("lifecycle event '{0}' is missing a command or event name")]
    MissingEvent(String),
}

impl FromStr for LifecycleEvent {
    type Err = LifecycleParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().is_empty() {
            return Err(LifecycleParseError::Empty);
        }

        let (phase, rest) = match value.split_once(':') {
            Some(("before", rest)) => (HookPhase::Before, rest),
            Some(("after", rest)) => (HookPhase::After, rest),
            _ => (HookPhase::At, value),
        };

        let (command, event) = rest
            .rsplit_once(':')
            .filter(|(command, event)| !command.is_empty() && !event.is_empty())
            .ok_or_else(|| LifecycleParseError::MissingEvent(value.to_string()))?;

        Ok(Self::new(phase, command, event))
    }
}

/// Ordered lifecycle events for a command, or `None` if the command is unknown.
pub fn lifecycle_events(command: &str) -> Option<&'static [&'static str]> {
    match command {
        "package" => Some(PACKAGE_LIFECYCLE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_before_hook() {
        let event = LifecycleEvent::from_str("before:package:createDeploymentArtifacts")
            .expect("before hook should parse");
        assert_eq!(event.phase, HookPhase::Before);
        assert_eq!(event.command, "package");
        assert_eq!(event.event, "createDeploymentArtifacts");
        assert!(event.is_known());
    }

    #[test]
    fn parses_plain_event_and_nested_command() {
        let event = LifecycleEvent::from_str("package:finalize").expect("should parse");
        assert_eq!(event.phase, HookPhase::At);
        assert_eq!(event.canonical(), "package:finalize");

        let nested = LifecycleEvent::from_str("after:deploy:function:deploy").expect("should parse");
        assert_eq!(nested.phase, HookPhase::After);
        assert_eq!(nested.command, "deploy:function");
        assert_eq!(nested.event, "deploy");
        assert!(!nested.is_known());
    }

    #[test]
    fn canonical_round_trips() {
        let raw = "after:package:cleanup";
        let event = LifecycleEvent::from_str(raw).unwrap();
        assert_eq!(event.to_string(), raw);
    }

    #[test]
    fn rejects_malformed_events() {
        assert_eq!(LifecycleEvent::from_str(""), Err(LifecycleParseError::Empty));
        assert!(matches!(
            LifecycleEvent::from_str("before:package"),
            Err(LifecycleParseError::MissingEvent(_))
        ));
        assert!(matches!(
            LifecycleEvent::from_str("package:"),
            Err(LifecycleParseError::MissingEvent(_))
        ));
    }
}
