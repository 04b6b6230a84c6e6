use std::fmt;

/// Written once before the root's line.
const ROOT_LABEL: &str = "root: ";

/// Which child slot of a node a line of the rendering describes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    /// The line written in place of a missing child.
    fn placeholder(self) -> &'static str {
        match self {
            Side::Left => "<no left node>",
            Side::Right => "<no right node>",
        }
    }
}

/// A line of the rendering that hasn't been written yet.
enum Pending<N> {
    /// A node at the given depth. Its children get pushed once its own line is written.
    Node(N, usize),
    /// An empty child slot at the given depth.
    Missing(Side, usize),
}

impl<N> Pending<N> {
    fn child(slot: Option<N>, side: Side, depth: usize) -> Self {
        match slot {
            Some(node) => Pending::Node(node, depth),
            None => Pending::Missing(side, depth),
        }
    }
}

/// Renders the subtree under `root` in pre-order: a node's value, then its left child, then its
/// right child, each one tab deeper than its parent. `expand` maps a node handle to its value and
/// its two child handles so both tree flavors can share this.
///
/// The work is driven by an explicit stack so deep (unbalanced) trees don't exhaust the call
/// stack.
pub(crate) fn render<'a, N, T, W>(
    out: &mut W,
    root: N,
    mut expand: impl FnMut(N) -> (&'a T, Option<N>, Option<N>),
) -> fmt::Result
where
    T: fmt::Display + 'a,
    W: fmt::Write + ?Sized,
{
    out.write_str(ROOT_LABEL)?;

    let mut pending = vec![Pending::Node(root, 0)];
    while let Some(line) = pending.pop() {
        match line {
            Pending::Node(node, depth) => {
                let (value, left, right) = expand(node);
                write_indent(out, depth)?;
                writeln!(out, "{}", value)?;

                // Right first so the left subtree is popped (and written) first.
                pending.push(Pending::child(right, Side::Right, depth + 1));
                pending.push(Pending::child(left, Side::Left, depth + 1));
            }
            Pending::Missing(side, depth) => {
                write_indent(out, depth)?;
                writeln!(out, "{}", side.placeholder())?;
            }
        }
    }

    Ok(())
}

fn write_indent<W>(out: &mut W, depth: usize) -> fmt::Result
where
    W: fmt::Write + ?Sized,
{
    for _ in 0..depth {
        out.write_char('\t')?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A tiny hand-built tree addressed by indices into a slice.
    struct Fixture {
        values: &'static [i32],
        children: &'static [(Option<usize>, Option<usize>)],
    }

    impl Fixture {
        fn render(&self) -> String {
            let mut out = String::new();
            render(&mut out, 0, |i| (&self.values[i], self.children[i].0, self.children[i].1))
                .unwrap();
            out
        }
    }

    #[test]
    fn single_node_gets_both_placeholders() {
        let fixture = Fixture {
            values: &[1],
            children: &[(None, None)],
        };

        assert_eq!(
            fixture.render(),
            "root: 1\n\t<no left node>\n\t<no right node>\n"
        );
    }

    #[test]
    fn left_subtree_is_written_before_right_subtree() {
        let fixture = Fixture {
            values: &[2, 1, 3],
            children: &[(Some(1), Some(2)), (None, None), (None, None)],
        };

        pretty_assertions::assert_eq!(
            fixture.render(),
            concat!(
                "root: 2\n",
                "\t1\n",
                "\t\t<no left node>\n",
                "\t\t<no right node>\n",
                "\t3\n",
                "\t\t<no left node>\n",
                "\t\t<no right node>\n",
            )
        );
    }

    #[test]
    fn placeholders_name_their_side() {
        assert_eq!(Side::Left.placeholder(), "<no left node>");
        assert_eq!(Side::Right.placeholder(), "<no right node>");
    }
}
