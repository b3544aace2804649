mod statements_tests;
mod unexpected_tests;
mod nesting_tests;
