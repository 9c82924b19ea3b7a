pub mod writing_assistant;
