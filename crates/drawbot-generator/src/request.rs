use drawbot_designer::ShapeCommand;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What the generator is asked for: the new instruction, with the
/// instructions already carried out and the shapes already on the canvas
/// as context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub previous_instructions: Vec<String>,
    pub existing_drawing: Vec<Value>,
    pub new_instruction: String,
}

impl GenerationRequest {
    pub fn new(
        previous_instructions: &[String],
        existing: &[ShapeCommand],
        new_instruction: &str,
    ) -> serde_json::Result<Self> {
        let existing_drawing = existing
            .iter()
            .map(ShapeCommand::to_value)
            .collect::<serde_json::Result<Vec<_>>>()?;

        Ok(Self {
            previous_instructions: previous_instructions.to_vec(),
            existing_drawing,
            new_instruction: new_instruction.trim().to_string(),
        })
    }
}
