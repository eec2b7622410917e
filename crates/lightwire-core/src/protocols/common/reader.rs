pub(crate) fn optional_nonzero_u8(value: u8) -> Option<u8> {
    if value == 0 { None } else { Some(value) }
}
