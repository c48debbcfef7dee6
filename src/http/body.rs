//! Streaming body module
//!
//! Moves bytes between HTTP bodies and files through a fixed-size buffer,
//! never holding a whole payload in memory.

use futures_util::StreamExt;
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Empty, StreamBody};
use hyper::body::{Body, Bytes, Frame};
use std::io;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio_util::io::ReaderStream;

/// Size of the intermediate buffer used for every transfer
pub const TRANSFER_BUFFER_SIZE: usize = 10_000;

pub type ResponseBody = UnsyncBoxBody<Bytes, io::Error>;

/// Body with no content
pub fn empty() -> ResponseBody {
    Empty::<Bytes>::new()
        .map_err(|never| match never {})
        .boxed_unsync()
}

/// Stream `file` as a body in chunks of at most `TRANSFER_BUFFER_SIZE` bytes.
///
/// `guard` lives until the body is dropped, i.e. until the last chunk has
/// been written out or the client went away.
pub fn file_body<G>(file: File, guard: G) -> ResponseBody
where
    G: Send + 'static,
{
    let stream = ReaderStream::with_capacity(file, TRANSFER_BUFFER_SIZE).map(move |chunk| {
        let _held = &guard;
        chunk.map(Frame::data)
    });
    StreamBody::new(stream).boxed_unsync()
}

/// Copy every data frame of `body` into `file`, returning the byte count.
///
/// On error the file keeps whatever was written so far.
pub async fn copy_body_to_file<B>(mut body: B, file: File) -> io::Result<u64>
where
    B: Body<Data = Bytes> + Unpin,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let mut writer = BufWriter::with_capacity(TRANSFER_BUFFER_SIZE, file);
    let mut written: u64 = 0;

    while let Some(frame) = body.frame().await {
        let frame = frame.map_err(io::Error::other)?;
        // Trailers carry no file content
        if let Ok(data) = frame.into_data() {
            writer.write_all(&data).await?;
            written += data.len() as u64;
        }
    }

    writer.flush().await?;
    Ok(written)
}
