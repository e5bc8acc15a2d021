use crate::{
    core::function_call::FunctionResult,
    types::gemini::{Content, FunctionDeclaration, GenerateContentRequest, GenerationConfig},
};

/// Message history for one planning run
#[derive(Clone, Debug, Default)]
pub(crate) struct Conversation {
    system_instruction: Option<Content>,
    contents: Vec<Content>,
}

impl Conversation {
    pub fn new(system_instruction: Option<&str>) -> Self {
        Self {
            system_instruction: system_instruction.map(Content::system),
            contents: Vec::new(),
        }
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.contents.push(Content::user_text(text));
    }

    /// Keep a model turn (with its function calls) in the history
    pub fn push_model(&mut self, content: Content) {
        self.contents.push(content);
    }

    /// Answer every call of the previous model turn in one function-role turn
    pub fn push_function_results(&mut self, results: &[FunctionResult]) {
        let parts = results.iter().map(FunctionResult::to_part).collect();
        self.contents.push(Content::function_responses(parts));
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn to_request(
        &self,
        generation: GenerationConfig,
        declarations: Vec<FunctionDeclaration>,
    ) -> GenerateContentRequest {
        GenerateContentRequest::new(self.contents.clone())
            .with_system_instruction(self.system_instruction.clone())
            .with_function_declarations(declarations)
            .with_generation_config(generation)
    }
}
