//! Decompressed page body layout.

use bytes::{Buf, Bytes};

use tsscan_common::error::{ReadError, ReadResult};
use tsscan_encoding::varint::read_varint_len;

/// The two channels of a decompressed page body.
#[derive(Debug, Clone)]
pub struct PageBody {
    /// TS_2DIFF encoded timestamps.
    pub times: Bytes,
    /// Encoded values, in the page's value encoding.
    pub values: Bytes,
}

/// Splits a decompressed body into its time and value channels.
///
/// # Errors
///
/// Returns `Truncated` if the time length prefix is cut off or points past
/// the end of the body.
pub fn split_page_body(mut body: Bytes) -> ReadResult<PageBody> {
    let time_len = read_varint_len(&mut body)?;
    if body.remaining() < time_len {
        return Err(ReadError::truncated("page time channel", time_len, body.remaining()));
    }
    let times = body.split_to(time_len);
    Ok(PageBody {
        times,
        values: body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split() {
        let body = Bytes::from_static(&[3, 1, 2, 3, 9, 9]);
        let page = split_page_body(body).unwrap();
        assert_eq!(&page.times[..], &[1, 2, 3]);
        assert_eq!(&page.values[..], &[9, 9]);
    }

    #[test]
    fn test_empty_value_channel() {
        let page = split_page_body(Bytes::from_static(&[1, 7])).unwrap();
        assert_eq!(&page.times[..], &[7]);
        assert!(page.values.is_empty());
    }

    #[test]
    fn test_time_length_past_end() {
        let err = split_page_body(Bytes::from_static(&[5, 1, 2])).unwrap_err();
        assert!(err.is_truncation());

        let err = split_page_body(Bytes::new()).unwrap_err();
        assert!(err.is_truncation());
    }
}
