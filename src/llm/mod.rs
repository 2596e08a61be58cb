pub mod structured_llm_interface;
pub mod openai_compatible_llm;
pub mod gemini_llm;
pub mod ollama_llm;
pub mod claude_llm;
pub mod structured_llm_factory;

pub use structured_llm_interface::*;
pub use structured_llm_factory::StructuredLLMFactory;
