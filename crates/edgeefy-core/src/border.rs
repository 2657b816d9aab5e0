/// Maps a possibly out-of-range index into `[0, len)` by mirroring about the
/// edge pixels without repeating them: `-1 -> 1`, `len -> len - 2`.
///
/// Reflections keep bouncing between both edges, so offsets larger than the
/// axis still land in bounds. Returns `None` only for `len == 0`.
pub fn mirror_index(i: isize, len: usize) -> Option<usize> {
    let last = len.checked_sub(1)? as isize;
    if last == 0 {
        return Some(0);
    }

    // triangle wave: 0 ..= last on the way out, last ..= 0 on the way back
    let folded = i.rem_euclid(2 * last);
    Some((last - (last - folded).abs()) as usize)
}
