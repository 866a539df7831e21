/// Sorts `v` by walking each element left until it no longer precedes its neighbour. Used for the
/// short ranges left over by the hybrid strategies.
pub(crate) fn insertion_sort<T, F>(v: &mut [T], less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    for i in 1..v.len() {
        let mut j = i;
        while j > 0 && less(&v[j], &v[j - 1]) {
            v.swap(j, j - 1);
            j -= 1;
        }
    }
}
