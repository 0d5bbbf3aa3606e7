mod prepare_tests;
mod resolve_tests;
