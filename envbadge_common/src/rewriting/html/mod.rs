pub mod badge_rewriter;
