//! Declarative workflow and trigger definitions.
//!
//! The "submit request" workflow is a form step followed by the message
//! posting step, started from a slash command. These definitions drive the
//! form modal, the webhook routing and the generated app manifest.

/// A field collected by a form step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    /// Field name; doubles as the input block ID.
    pub name: &'static str,
    /// Label shown above the input.
    pub title: &'static str,
    /// Render as a multiline input.
    pub long: bool,
    /// Whether Slack must enforce a value before submitting.
    pub required: bool,
}

/// A form-collection step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormDefinition {
    /// Modal title.
    pub title: &'static str,
    /// Submit button label.
    pub submit_label: &'static str,
    /// Fields in display order.
    pub fields: &'static [FormField],
}

/// A custom function step implemented by this app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionDefinition {
    /// Function callback ID.
    pub callback_id: &'static str,
    /// Human-readable title.
    pub title: &'static str,
    /// Description.
    pub description: &'static str,
}

/// Steps of a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDefinition {
    /// Collect input through a modal form.
    OpenForm(FormDefinition),
    /// Run an app function.
    Function(FunctionDefinition),
}

/// An ordered sequence of steps with a callback ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowDefinition {
    /// Workflow callback ID.
    pub callback_id: &'static str,
    /// Human-readable title.
    pub title: &'static str,
    /// Steps in execution order.
    pub steps: &'static [StepDefinition],
}

/// How a workflow is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    /// A slash command typed in a channel.
    SlashCommand {
        /// Command including the leading slash.
        command: &'static str,
    },
}

/// An entry point into a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerDefinition {
    /// How the trigger fires.
    pub kind: TriggerKind,
    /// Trigger name.
    pub name: &'static str,
    /// Trigger description.
    pub description: &'static str,
    /// Workflow started by this trigger.
    pub workflow: &'static WorkflowDefinition,
}

/// The description field of the request form.
pub const DESCRIPTION_FIELD: FormField = FormField {
    name: "description",
    title: "Description",
    long: true,
    required: true,
};

/// Form step collecting the request description.
pub const REQUEST_FORM: FormDefinition = FormDefinition {
    title: "Submit a request",
    submit_label: "Submit",
    fields: &[DESCRIPTION_FIELD],
};

/// Function step posting the request message.
pub const POST_REQUEST_MESSAGE: FunctionDefinition = FunctionDefinition {
    callback_id: "post_request_message",
    title: "Post a request to channel",
    description: "Create a request message from submitted form",
};

/// The "submit an editable request" workflow.
pub const SUBMIT_REQUEST_WORKFLOW: WorkflowDefinition = WorkflowDefinition {
    callback_id: "submit-editable-request",
    title: "Submit an editable request",
    steps: &[
        StepDefinition::OpenForm(REQUEST_FORM),
        StepDefinition::Function(POST_REQUEST_MESSAGE),
    ],
};

/// Slash command trigger for [`SUBMIT_REQUEST_WORKFLOW`].
pub const SUBMIT_REQUEST_TRIGGER: TriggerDefinition = TriggerDefinition {
    kind: TriggerKind::SlashCommand {
        command: "/request",
    },
    name: "Submit an editable request",
    description: "Submit an editable request to the channel",
    workflow: &SUBMIT_REQUEST_WORKFLOW,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_starts_with_form() {
        assert_eq!(
            SUBMIT_REQUEST_WORKFLOW.steps.first(),
            Some(&StepDefinition::OpenForm(REQUEST_FORM))
        );
    }

    #[test]
    fn test_workflow_ends_with_post_function() {
        assert_eq!(
            SUBMIT_REQUEST_WORKFLOW.steps.last(),
            Some(&StepDefinition::Function(POST_REQUEST_MESSAGE))
        );
    }

    #[test]
    fn test_trigger_targets_workflow() {
        assert_eq!(
            SUBMIT_REQUEST_TRIGGER.workflow.callback_id,
            "submit-editable-request"
        );
        assert!(matches!(
            SUBMIT_REQUEST_TRIGGER.kind,
            TriggerKind::SlashCommand { command: "/request" }
        ));
    }
}
