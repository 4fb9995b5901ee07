use protocol::{MovieId, Path};

/// Splice two half-chains at their shared meeting node. Both halves run
/// `[meeting, ..., root]`; the meeting node is dropped from the source half
/// before reversing so it appears exactly once.
pub(crate) fn splice(src_half: Vec<MovieId>, dest_half: Vec<MovieId>) -> Path {
    let mut path: Path = src_half.into_iter().skip(1).rev().collect();
    path.extend(dest_half);
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[i64]) -> Vec<MovieId> {
        raw.iter().copied().map(MovieId).collect()
    }

    #[test]
    fn splice_joins_halves_at_meeting_node() {
        // src side reached 1037 via 680 from root 500; dest side reached 1037
        // directly from root 14839.
        let src_half = ids(&[1037, 680, 500]);
        let dest_half = ids(&[1037, 14839]);
        assert_eq!(splice(src_half, dest_half), ids(&[500, 680, 1037, 14839]));
    }

    #[test]
    fn splice_when_meeting_node_is_a_root() {
        // dest side discovered the source root itself.
        let src_half = ids(&[500]);
        let dest_half = ids(&[500, 680, 1037]);
        assert_eq!(splice(src_half, dest_half), ids(&[500, 680, 1037]));
    }
}
