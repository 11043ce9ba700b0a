pub mod all_different;
pub mod differing_pair;
