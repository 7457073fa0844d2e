use crate::constants::{D_MESG, D_PBLC};
use crate::types::{Identifier, Node};
use digest::Digest;
use sha2::Sha256;

/// Returns an iterator over the w-bit Winternitz coefficients of the input
/// bytes. Implements the Coef function from section 3.1.3 of RFC 8554.
pub(crate) fn coefs<'a>(
    bytes: impl IntoIterator<Item = &'a u8>,
    w: usize,
) -> impl Iterator<Item = u8> {
    let mask: u8 = match w {
        1 => 0x01,
        2 => 0x03,
        4 => 0x0f,
        8 => 0xff,
        _ => panic!("invalid bit width: {}", w),
    };

    let entries_per_byte: usize = 8 / w;
    bytes
        .into_iter()
        .cloned()
        .flat_map(move |byte| (0..entries_per_byte).map(move |i| (byte >> (8 - w - i * w)) & mask))
}

/// Advances chain `i` from step `from` to step `to` (exclusive):
/// `tmp = H(I || u32str(q) || u16str(i) || u8str(j) || tmp)` for each `j`.
pub(crate) fn chain(id: &Identifier, q: u32, i: u16, from: u8, to: u8, start: Node) -> Node {
    let mut tmp = start;
    for j in from..to {
        tmp = Sha256::new()
            .chain_update(id)
            .chain_update(q.to_be_bytes())
            .chain_update(i.to_be_bytes())
            .chain_update([j])
            .chain_update(tmp)
            .finalize()
            .into();
    }
    tmp
}

/// `Q = H(I || u32str(q) || D_MESG || C || message)`
pub(crate) fn message_digest(id: &Identifier, q: u32, c: &Node, message: &[u8]) -> Node {
    Sha256::new()
        .chain_update(id)
        .chain_update(q.to_be_bytes())
        .chain_update(D_MESG)
        .chain_update(c)
        .chain_update(message)
        .finalize()
        .into()
}

/// `K = H(I || u32str(q) || D_PBLC || z[0] || .. || z[p-1])`
pub(crate) fn public_digest(id: &Identifier, q: u32, z: &[Node]) -> Node {
    let mut hasher = Sha256::new()
        .chain_update(id)
        .chain_update(q.to_be_bytes())
        .chain_update(D_PBLC);
    for item in z {
        hasher.update(item);
    }
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use crate::ots::util::coefs;

    #[test]
    fn coef_test_w1() {
        let s = [0x12, 0x34];
        let cs = coefs(&s, 1).collect::<Vec<_>>();
        assert_eq!(cs, vec![0, 0, 0, 1, 0, 0, 1, 0, 0, 0, 1, 1, 0, 1, 0, 0]);
    }

    #[test]
    fn coef_test_w2() {
        let s = [0x12, 0x34];
        let cs: Vec<u8> = coefs(&s, 2).collect::<Vec<_>>();
        assert_eq!(cs, vec![0, 1, 0, 2, 0, 3, 1, 0]);
    }

    #[test]
    fn coef_test_w4() {
        let s = [0x12, 0x34];
        let cs: Vec<u8> = coefs(&s, 4).collect::<Vec<_>>();
        assert_eq!(cs, vec![1, 2, 3, 4]);
    }

    #[test]
    fn coef_test_w8() {
        let s = [0x12, 0x34];
        let cs: Vec<u8> = coefs(&s, 8).collect::<Vec<_>>();
        assert_eq!(cs, vec![0x12, 0x34]);
    }
}
