//! Builds a small tree, prints it, deletes a node with two children and prints it again.
//!
//! Run with `RUST_LOG=trace` to see the structural changes as they happen.

use std::io;

use ordered_bst::boxed::Tree;

fn main() -> io::Result<()> {
    env_logger::init();

    let mut tree = Tree::new();
    for value in [0, 0, 1, 7, 2, 4, 3, 5, 6, 69] {
        tree.insert(value);
    }

    tree.print()?;

    tree.delete(&7);

    tree.print()
}
