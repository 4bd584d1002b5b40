use mezza_core::{
    context::{ExecutionContext, ParamValue, Parameters, ProcessingStage, param},
    types::{Record, RecordId, RecordRef},
};

///
/// BoundaryContext
///
/// Ready-made [`ExecutionContext`] for handler tests; hosts get the same
/// surface their platform adapter would provide, minus the platform.
///

pub struct BoundaryContext {
    message: String,
    stage: ProcessingStage,
    entity: String,
    entity_id: RecordId,
    inputs: Parameters,
    outputs: Parameters,
    pre: Option<Record>,
    post: Option<Record>,
    user: RecordId,
    correlation: RecordId,
}

impl ExecutionContext for BoundaryContext {
    fn message_name(&self) -> &str {
        &self.message
    }

    fn stage(&self) -> ProcessingStage {
        self.stage
    }

    fn primary_entity_name(&self) -> &str {
        &self.entity
    }

    fn primary_entity_id(&self) -> RecordId {
        self.entity_id
    }

    fn input_parameters(&self) -> &Parameters {
        &self.inputs
    }

    fn output_parameters(&self) -> &Parameters {
        &self.outputs
    }

    fn pre_image(&self) -> Option<&Record> {
        self.pre.as_ref()
    }

    fn post_image(&self) -> Option<&Record> {
        self.post.as_ref()
    }

    fn user_id(&self) -> RecordId {
        self.user
    }

    fn correlation_id(&self) -> RecordId {
        self.correlation
    }
}

///
/// ContextBuilder
///

pub struct ContextBuilder {
    context: BoundaryContext,
}

impl ContextBuilder {
    /// Starts at the main operation stage with empty parameter bags.
    #[must_use]
    pub fn new(message: impl Into<String>, entity: impl Into<String>) -> Self {
        Self {
            context: BoundaryContext {
                message: message.into(),
                stage: ProcessingStage::Main,
                entity: entity.into(),
                entity_id: RecordId::UNSET,
                inputs: Parameters::new(),
                outputs: Parameters::new(),
                pre: None,
                post: None,
                user: RecordId::UNSET,
                correlation: RecordId::UNSET,
            },
        }
    }

    #[must_use]
    pub const fn stage(mut self, stage: ProcessingStage) -> Self {
        self.context.stage = stage;
        self
    }

    #[must_use]
    pub const fn entity_id(mut self, id: RecordId) -> Self {
        self.context.entity_id = id;
        self
    }

    /// Sets the `Target` input to a full record.
    #[must_use]
    pub fn target_record(self, record: Record) -> Self {
        self.input(param::TARGET, record)
    }

    /// Sets the `Target` input to a weak reference.
    #[must_use]
    pub fn target_reference(self, reference: RecordRef) -> Self {
        self.input(param::TARGET, reference)
    }

    #[must_use]
    pub fn input(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.context.inputs = self.context.inputs.with(name, value);
        self
    }

    #[must_use]
    pub fn output(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.context.outputs = self.context.outputs.with(name, value);
        self
    }

    #[must_use]
    pub fn pre_image(mut self, record: Record) -> Self {
        self.context.pre = Some(record);
        self
    }

    #[must_use]
    pub fn post_image(mut self, record: Record) -> Self {
        self.context.post = Some(record);
        self
    }

    #[must_use]
    pub const fn user(mut self, id: RecordId) -> Self {
        self.context.user = id;
        self
    }

    #[must_use]
    pub const fn correlation(mut self, id: RecordId) -> Self {
        self.context.correlation = id;
        self
    }

    #[must_use]
    pub fn build(self) -> BoundaryContext {
        self.context
    }

    /// Boxed form, ready for container construction.
    #[must_use]
    pub fn boxed(self) -> Box<dyn ExecutionContext> {
        Box::new(self.context)
    }
}
