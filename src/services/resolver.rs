use crate::domain::models::FALLBACK_LABEL;
use crate::services::api::AccountApi;
use tracing::warn;

/// Outcome of looking up the display name of an attachment's owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(String),
    /// The owner type has no name lookup (policy, decision, post, untyped, ...).
    NotApplicable,
    Fallback {
        reason: String,
    },
}

impl Resolution {
    /// Name used for the last directory segment; empty means no segment.
    pub fn display_name(&self) -> &str {
        match self {
            Resolution::Resolved(name) => name,
            Resolution::NotApplicable => "",
            Resolution::Fallback { .. } => FALLBACK_LABEL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LookupKind {
    Process,
    App,
    Instance,
}

fn lookup_kind(attached_to_type: &str) -> Option<LookupKind> {
    if attached_to_type.eq_ignore_ascii_case("process") {
        Some(LookupKind::Process)
    } else if attached_to_type.eq_ignore_ascii_case("app") {
        Some(LookupKind::App)
    } else if attached_to_type.eq_ignore_ascii_case("instance") {
        Some(LookupKind::Instance)
    } else {
        None
    }
}

pub struct NameResolver<'a, A: AccountApi + ?Sized> {
    api: &'a A,
}

impl<'a, A: AccountApi + ?Sized> NameResolver<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Issues at most one lookup call; never fails.
    pub fn resolve(&self, attached_to_type: Option<&str>, attached_to_id: Option<&str>) -> Resolution {
        let Some(kind) = attached_to_type.and_then(lookup_kind) else {
            return Resolution::NotApplicable;
        };
        let Some(id) = attached_to_id.filter(|id| !id.is_empty()) else {
            warn!(?kind, "attachment has an owner type but no owner id");
            return Resolution::Fallback {
                reason: "missing attachedToId".to_string(),
            };
        };

        let looked_up = match kind {
            LookupKind::Process => self.api.lookup_process_name(id),
            LookupKind::App => self.api.lookup_app_name_by_process_id(id),
            LookupKind::Instance => self.api.lookup_instance_name(id),
        };
        match looked_up {
            Ok(name) => Resolution::Resolved(name),
            Err(e) => {
                warn!(id, error = %e, "could not resolve owner name, using '{}'", FALLBACK_LABEL);
                Resolution::Fallback {
                    reason: e.to_string(),
                }
            }
        }
    }
}
