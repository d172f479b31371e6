/// Expands the run-length encoded visibility row starting at `offset`.
///
/// Non-zero bytes are literal bit sets. A zero byte is followed by the number of zero bytes it
/// stands for. Bit `i` of the row is leaf `i + 1`, leaf 0 being the shared solid leaf.
///
/// A row that runs off the end of the lump is padded with invisible leaves. Leaves without
/// a row (`offset` is `None`) see everything.
pub fn decompress_vis(vis: &[u8], offset: Option<usize>, leaves: usize) -> Vec<bool> {
    let Some(mut pos) = offset else {
        return vec![true; leaves];
    };

    let row_len = (leaves + 7) / 8;
    let mut row = Vec::with_capacity(row_len);

    while row.len() < row_len {
        let Some(&byte) = vis.get(pos) else {
            log::warn!("visibility row at {offset:?} runs past the lump");
            break;
        };
        pos += 1;

        if byte != 0 {
            row.push(byte);
            continue;
        }

        let run = vis.get(pos).copied().unwrap_or(0) as usize;
        pos += 1;
        let run = run.min(row_len - row.len());
        row.extend(std::iter::repeat(0).take(run));
    }
    row.resize(row_len, 0);

    (0..leaves).map(|i| row[i / 8] & (1 << (i % 8)) != 0).collect()
}
