//! Hook decisions and their stdout payloads.
//!
//! The gate terminates in exactly one decision per invocation. Blocking is
//! communicated through the structured payload, never the exit code; a
//! `Pass` produces no output at all.

use serde::Serialize;

use crate::error::Result;
use crate::event::HookEvent;

/// Terminal signal emitted to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Nothing to report — no output, success exit.
    Pass,

    /// Hard stop with a Markdown reason the caller must remediate.
    Block { reason: String },

    /// Non-blocking context attached to the triggering event.
    InjectContext { event: String, context: String },
}

#[derive(Serialize)]
struct BlockPayload<'a> {
    decision: &'a str,
    reason: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HookSpecificOutput<'a> {
    hook_event_name: &'a str,
    additional_context: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InjectPayload<'a> {
    hook_specific_output: HookSpecificOutput<'a>,
}

/// Map an event and an optional rendered report onto a decision.
///
/// `PostToolUse` blocks on findings; `UserPromptSubmit` injects them as
/// context; no findings means `Pass` either way. Events without a policy
/// never reach this function (the dispatcher acknowledges them directly),
/// but degrade to `Pass` if they do.
pub fn emit(event: &HookEvent, report: Option<String>) -> Decision {
    match (event, report) {
        (HookEvent::PostToolUse, Some(reason)) => Decision::Block { reason },
        (HookEvent::UserPromptSubmit, Some(context)) => Decision::InjectContext {
            event: event.name().to_string(),
            context,
        },
        _ => Decision::Pass,
    }
}

impl Decision {
    /// The single stdout line for this decision, if any.
    ///
    /// Compact JSON with non-ASCII characters preserved; `Pass` stays
    /// silent.
    pub fn to_payload(&self) -> Result<Option<String>> {
        match self {
            Decision::Pass => Ok(None),
            Decision::Block { reason } => {
                let payload = BlockPayload {
                    decision: "block",
                    reason,
                };
                Ok(Some(serde_json::to_string(&payload)?))
            }
            Decision::InjectContext { event, context } => {
                let payload = InjectPayload {
                    hook_specific_output: HookSpecificOutput {
                        hook_event_name: event,
                        additional_context: context,
                    },
                };
                Ok(Some(serde_json::to_string(&payload)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_tool_use_with_report_blocks() {
        let decision = emit(&HookEvent::PostToolUse, Some("report".to_string()));
        assert_eq!(
            decision,
            Decision::Block {
                reason: "report".to_string()
            }
        );
    }

    #[test]
    fn test_post_tool_use_without_report_passes() {
        assert_eq!(emit(&HookEvent::PostToolUse, None), Decision::Pass);
    }

    #[test]
    fn test_user_prompt_submit_with_report_injects() {
        let decision = emit(&HookEvent::UserPromptSubmit, Some("report".to_string()));
        assert_eq!(
            decision,
            Decision::InjectContext {
                event: "UserPromptSubmit".to_string(),
                context: "report".to_string(),
            }
        );
    }

    #[test]
    fn test_user_prompt_submit_without_report_passes() {
        assert_eq!(emit(&HookEvent::UserPromptSubmit, None), Decision::Pass);
    }

    #[test]
    fn test_pass_emits_nothing() {
        assert_eq!(Decision::Pass.to_payload().expect("payload"), None);
    }

    #[test]
    fn test_block_payload_wire_shape() {
        let decision = Decision::Block {
            reason: "### 诊断摘要".to_string(),
        };
        let payload = decision.to_payload().expect("payload").expect("line");
        assert_eq!(payload, r####"{"decision":"block","reason":"### 诊断摘要"}"####);
    }

    #[test]
    fn test_inject_payload_wire_shape() {
        let decision = Decision::InjectContext {
            event: "UserPromptSubmit".to_string(),
            context: "ctx".to_string(),
        };
        let payload = decision.to_payload().expect("payload").expect("line");
        assert_eq!(
            payload,
            r#"{"hookSpecificOutput":{"hookEventName":"UserPromptSubmit","additionalContext":"ctx"}}"#
        );
    }

    #[test]
    fn test_payload_is_single_line() {
        let decision = Decision::Block {
            reason: "line one\nline two".to_string(),
        };
        let payload = decision.to_payload().expect("payload").expect("line");
        assert!(!payload.contains('\n'));
    }
}
