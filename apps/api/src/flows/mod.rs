// Provider flows: model-assisted suggestion and conversational recommendation.
// All LLM calls go through llm_client — no direct Anthropic calls here.

pub mod handlers;
pub mod live;
pub mod prompts;
pub mod recommend;
pub mod suggest;
pub mod tools;
