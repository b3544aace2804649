mod expressions_tests;
mod forms_tests;
mod literals_tests;
mod members_tests;
mod objects_tests;
mod patterns_tests;
mod statements_tests;
mod urls_paths_tests;
