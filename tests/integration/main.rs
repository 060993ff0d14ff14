mod tree_processing_tests;
