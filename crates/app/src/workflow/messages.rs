//! Message and modal builders for the editable request workflow.
//!
//! Provides factory functions for:
//! - The request message with its Edit button and metadata
//! - The "invite the bot" instruction
//! - The request form, edit, permission denied and deleted modals

use editable_request_core::{ChannelId, EditSession, EditSessionError, MessageMetadata, Request, UserId};

use super::definition::FormDefinition;
use super::{
    DELETE_ACTION_ID, DELETED_CALLBACK_ID, DESCRIPTION_BLOCK_ID, EDIT_ACTION_ID,
    EDIT_CALLBACK_ID, INPUT_ACTION_ID,
};
use crate::slack::{
    Accessory, Block, ButtonStyle, InputElement, MessageContent, PlainText, Text, View,
};

/// Build the request message.
///
/// The same text is used for the notification fallback and the section
/// block, and the metadata carries both the description and the submitter
/// so later interactions can authorize and prefill the edit form.
#[must_use]
pub fn build_message(description: &str, submitter_id: &UserId) -> MessageContent {
    let text = format!("*Description of the issue:*\n{description}\n\n");
    let request = Request::new(description, submitter_id.clone());

    MessageContent {
        blocks: vec![Block::Section {
            text: Text::mrkdwn(text.clone()),
            block_id: None,
            accessory: Some(Accessory::Button {
                text: PlainText::new("Edit"),
                action_id: EDIT_ACTION_ID.to_string(),
                value: Some("clicked".to_string()),
                style: None,
            }),
        }],
        text,
        metadata: Some(MessageMetadata::for_request(&request)),
    }
}

/// Build the message asking a human to invite the bot into a channel.
#[must_use]
pub fn build_invite_message(bot_user_id: &UserId, channel: &ChannelId) -> MessageContent {
    MessageContent::text(format!(
        "Please invite this app's bot user <@{bot_user_id}> to this channel <#{channel}>"
    ))
}

/// Build the form modal for a form step.
///
/// The invoking channel travels in `private_metadata` so the submission can
/// be posted back to it.
#[must_use]
pub fn build_form_view(callback_id: &str, form: &FormDefinition, channel: &ChannelId) -> View {
    form.fields.iter().fold(
        View::modal(callback_id, form.title)
            .submit(form.submit_label)
            .private_metadata(channel.as_str()),
        |view, field| {
            view.block(Block::Input {
                block_id: field.name.to_string(),
                element: InputElement::PlainTextInput {
                    action_id: INPUT_ACTION_ID.to_string(),
                    multiline: field.long,
                    initial_value: None,
                },
                label: PlainText::new(field.title),
                optional: !field.required,
            })
        },
    )
}

/// Build the edit/delete modal for an authorized submitter.
///
/// The delete section carries the channel as its block ID and the message
/// timestamp as the button value, so deletion never depends on the private
/// metadata.
///
/// # Errors
///
/// Returns an error if the session cannot be serialized.
pub fn build_edit_view(session: &EditSession, description: &str) -> Result<View, EditSessionError> {
    Ok(View::modal(EDIT_CALLBACK_ID, "Edit/delete message")
        .submit("Save")
        .private_metadata(session.to_private_metadata()?)
        .block(Block::Section {
            text: Text::mrkdwn(" "),
            block_id: Some(session.channel.to_string()),
            accessory: Some(Accessory::Button {
                text: PlainText::new("Delete"),
                action_id: DELETE_ACTION_ID.to_string(),
                value: Some(session.ts.to_string()),
                style: Some(ButtonStyle::Danger),
            }),
        })
        .block(Block::Input {
            block_id: DESCRIPTION_BLOCK_ID.to_string(),
            element: InputElement::PlainTextInput {
                action_id: INPUT_ACTION_ID.to_string(),
                multiline: true,
                initial_value: Some(description.to_string()),
            },
            label: PlainText::new("Description"),
            optional: false,
        }))
}

/// Build the read-only modal shown to anyone but the submitter.
#[must_use]
pub fn build_permission_denied_view() -> View {
    View::modal(EDIT_CALLBACK_ID, "Permission denied").block(Block::Section {
        text: Text::mrkdwn(
            ":warning: Sorry! Only the person who submitted this request has the ability to edit or delete the posted message.",
        ),
        block_id: None,
        accessory: None,
    })
}

/// Build the terminal modal shown after a deletion.
#[must_use]
pub fn build_deleted_view() -> View {
    View::modal(DELETED_CALLBACK_ID, "Message deleted").block(Block::Section {
        text: Text::mrkdwn("The message has been deleted!"),
        block_id: None,
        accessory: None,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::workflow::definition::{DESCRIPTION_FIELD, FormField, REQUEST_FORM};
    use editable_request_core::{MessageTs, REQUEST_EVENT_TYPE};
    use serde_json::json;

    #[test]
    fn test_message_text_format() {
        let message = build_message("printer broken", &UserId::new("U1"));
        assert_eq!(message.text, "*Description of the issue:*\nprinter broken\n\n");
    }

    #[test]
    fn test_message_has_single_edit_button() {
        let message = build_message("printer broken", &UserId::new("U1"));

        assert_eq!(message.blocks.len(), 1);
        match message.blocks.first() {
            Some(Block::Section {
                accessory: Some(Accessory::Button { action_id, .. }),
                ..
            }) => assert_eq!(action_id, "edit-message"),
            other => panic!("Expected section with button, got {other:?}"),
        }
    }

    #[test]
    fn test_message_metadata_carries_request() {
        let message = build_message("printer broken", &UserId::new("U1"));
        let metadata = message.metadata.unwrap();

        assert_eq!(metadata.event_type, REQUEST_EVENT_TYPE);
        assert_eq!(
            metadata.request(),
            Some(Request::new("printer broken", UserId::new("U1")))
        );
    }

    #[test]
    fn test_message_is_deterministic() {
        let a = build_message("same", &UserId::new("U1"));
        let b = build_message("same", &UserId::new("U1"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_invite_message_mentions_bot_and_channel() {
        let message = build_invite_message(&UserId::new("UBOT"), &ChannelId::new("C1"));
        assert_eq!(
            message.text,
            "Please invite this app's bot user <@UBOT> to this channel <#C1>"
        );
        assert!(message.blocks.is_empty());
        assert!(message.metadata.is_none());
    }

    #[test]
    fn test_form_view_has_description_input() {
        let view = build_form_view("submit-editable-request", &REQUEST_FORM, &ChannelId::new("C1"));
        let value = serde_json::to_value(&view).unwrap();

        assert_eq!(value["callback_id"], "submit-editable-request");
        assert_eq!(value["title"]["text"], "Submit a request");
        assert_eq!(value["submit"]["text"], "Submit");
        assert_eq!(value["private_metadata"], "C1");
        assert_eq!(value["blocks"][0]["block_id"], "description");
        assert_eq!(value["blocks"][0]["element"]["action_id"], "input");
        assert_eq!(value["blocks"][0]["element"]["multiline"], true);
        assert_eq!(value["blocks"][0]["optional"], false);
    }

    #[test]
    fn test_form_view_marks_optional_fields() {
        const NOTES: FormField = FormField {
            name: "notes",
            title: "Notes",
            long: false,
            required: false,
        };
        const FIELDS: &[FormField] = &[DESCRIPTION_FIELD, NOTES];
        let form = FormDefinition {
            fields: FIELDS,
            ..REQUEST_FORM
        };

        let value = serde_json::to_value(build_form_view("submit-editable-request", &form, &ChannelId::new("C1")))
            .unwrap();

        assert_eq!(value["blocks"][0]["optional"], false);
        assert_eq!(value["blocks"][1]["block_id"], "notes");
        assert_eq!(value["blocks"][1]["optional"], true);
        assert_eq!(value["blocks"][1]["element"]["multiline"], false);
    }

    #[test]
    fn test_edit_view_structure() {
        let session = EditSession {
            channel: ChannelId::new("C1"),
            ts: MessageTs::new("1700000000.000100"),
            submitter_id: UserId::new("U1"),
        };
        let view = build_edit_view(&session, "printer broken").unwrap();
        let value = serde_json::to_value(&view).unwrap();

        assert_eq!(value["callback_id"], "edit-message");
        assert_eq!(value["submit"]["text"], "Save");
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(value["private_metadata"].as_str().unwrap())
                .unwrap(),
            json!({"channel": "C1", "ts": "1700000000.000100", "submitterId": "U1"})
        );

        let delete = &value["blocks"][0]["accessory"];
        assert_eq!(delete["action_id"], "delete-message");
        assert_eq!(delete["value"], "1700000000.000100");
        assert_eq!(delete["style"], "danger");
        assert_eq!(value["blocks"][0]["block_id"], "C1");

        let input = &value["blocks"][1];
        assert_eq!(input["block_id"], "description");
        assert_eq!(input["element"]["initial_value"], "printer broken");
        assert_eq!(input["optional"], false);
    }

    #[test]
    fn test_permission_denied_view_is_read_only() {
        let view = build_permission_denied_view();
        assert_eq!(view.title.text, "Permission denied");
        assert!(view.submit.is_none());
        assert!(view.private_metadata.is_none());
        assert!(view.blocks.iter().all(|b| !matches!(b, Block::Input { .. })));
    }

    #[test]
    fn test_deleted_view() {
        let view = build_deleted_view();
        assert_eq!(view.callback_id, "message-deleted");
        assert_eq!(view.title.text, "Message deleted");
    }
}
