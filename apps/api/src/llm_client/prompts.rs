// Cross-cutting prompt assembly. Stage- and chat-specific wording lives in
// pipeline/prompts.rs and chat/prompts.rs; this file only frames a GenerationRequest
// into the system + user messages sent over the wire.

use super::GenerationRequest;

/// Appended to every task so the model returns the deliverable itself.
pub const FINAL_ANSWER_INSTRUCTION: &str = "\
    You MUST return the actual complete content as the final answer, not a summary. \
    Do not describe your reasoning.";

/// Frames the agent persona: role, backstory, goal.
pub fn build_system_prompt(request: &GenerationRequest) -> String {
    let mut system = format!("You are {}.", request.role.trim());
    if !request.backstory.trim().is_empty() {
        system.push(' ');
        system.push_str(request.backstory.trim());
    }
    if !request.goal.trim().is_empty() {
        system.push_str("\nYour personal goal is: ");
        system.push_str(request.goal.trim());
    }
    system
}

/// Frames the task: instructions, then upstream context (if any), then the expected output.
pub fn build_task_prompt(request: &GenerationRequest) -> String {
    let mut prompt = String::from("Current Task: ");
    prompt.push_str(request.instructions.trim());

    if !request.context.trim().is_empty() {
        prompt.push_str("\n\nThis is the context you're working with:\n");
        prompt.push_str(request.context.trim());
    }

    if !request.expected_output.trim().is_empty() {
        prompt.push_str("\n\nThis is the expected criteria for your final answer: ");
        prompt.push_str(request.expected_output.trim());
    }

    prompt.push_str("\n\n");
    prompt.push_str(FINAL_ANSWER_INSTRUCTION);
    prompt
}
