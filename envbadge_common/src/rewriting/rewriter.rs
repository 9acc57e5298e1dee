pub trait Rewriter {
    fn rewrite(&self, input: String) -> String;
}
