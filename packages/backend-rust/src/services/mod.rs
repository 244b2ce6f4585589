pub mod learner_state;
pub mod scoring;
