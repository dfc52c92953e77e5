use model::FilterTree;

/// Renders a backend-agnostic filter tree in one backend's query language.
pub trait FilterCompiler {
    type Filter;

    fn compile(tree: &FilterTree) -> Self::Filter;
}
