use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use super::error::{ArtNetError, discard_rejected};
use super::layout::time_sync as field;
use super::opcode::OpCode;
use super::reader::ArtNetReader;
use super::writer::ArtNetWriter;

/// Whether an ArtTimeSync asks the receiver to set its clock or reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSyncMode {
    Response,
    Set,
}

impl TimeSyncMode {
    fn from_prog(prog: u8) -> Self {
        if prog == 0 {
            TimeSyncMode::Response
        } else {
            TimeSyncMode::Set
        }
    }

    fn prog(self) -> u8 {
        match self {
            TimeSyncMode::Response => 0,
            TimeSyncMode::Set => 1,
        }
    }
}

/// Wall-clock time as carried by ArtTimeSync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtTimeSync {
    pub mode: TimeSyncMode,
    pub seconds: u8,
    pub minutes: u8,
    pub hours: u8,
    pub month_day: u8,
    pub month: u8,
    /// Years since 1900.
    pub year: u16,
    /// 0 = Sunday.
    pub weekday: u8,
    pub daylight_saving: bool,
}

impl ArtTimeSync {
    /// Build from a calendar date and time.
    ///
    /// # Examples
    /// ```
    /// use time::macros::datetime;
    /// use lightwire_core::protocols::artnet::{ArtTimeSync, TimeSyncMode};
    ///
    /// let sync = ArtTimeSync::from_datetime(datetime!(2022-11-30 18:05:09), TimeSyncMode::Set, false)?;
    /// assert_eq!(sync.year, 122);
    /// assert_eq!(sync.weekday, 3); // Wednesday
    /// # Ok::<(), lightwire_core::protocols::artnet::ArtNetError>(())
    /// ```
    ///
    /// # Errors
    /// Returns `ArtNetError::YearOutOfRange` for years before 1900 or beyond
    /// what a 16-bit offset can hold.
    pub fn from_datetime(
        datetime: PrimitiveDateTime,
        mode: TimeSyncMode,
        daylight_saving: bool,
    ) -> Result<Self, ArtNetError> {
        let year = datetime.year();
        let offset = u16::try_from(year - field::YEAR_BASE)
            .map_err(|_| ArtNetError::YearOutOfRange { year })?;
        // Sunday = 1 ..= Saturday = 7 on the calendar side.
        let weekday = datetime.weekday().number_from_sunday();
        Ok(Self {
            mode,
            seconds: datetime.second(),
            minutes: datetime.minute(),
            hours: datetime.hour(),
            month_day: datetime.day(),
            month: u8::from(datetime.month()),
            year: offset,
            weekday: weekday - 1,
            daylight_saving,
        })
    }

    pub fn calendar_year(&self) -> i32 {
        field::YEAR_BASE + i32::from(self.year)
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut writer = ArtNetWriter::new(OpCode::TimeSync, field::LEN);
        writer.put_u16(field::FILLER, 0);
        writer.put_u8(field::PROG, self.mode.prog());
        writer.put_u8(field::SECONDS, self.seconds);
        writer.put_u8(field::MINUTES, self.minutes);
        writer.put_u8(field::HOURS, self.hours);
        writer.put_u8(field::MONTH_DAY, self.month_day);
        writer.put_u8(field::MONTH, self.month);
        writer.put_u16(field::YEAR, self.year);
        writer.put_u8(field::WEEKDAY, self.weekday);
        writer.put_u8(field::DST, u8::from(self.daylight_saving));
        writer.finish()
    }
}

pub fn parse_art_time_sync(payload: &[u8]) -> Result<Option<ArtTimeSync>, ArtNetError> {
    let reader = ArtNetReader::new(payload);
    if !reader.matches(OpCode::TimeSync)? {
        return Ok(None);
    }
    reader.require_len(field::LEN)?;

    Ok(Some(ArtTimeSync {
        mode: TimeSyncMode::from_prog(reader.read_u8(field::PROG)?),
        seconds: reader.read_u8(field::SECONDS)?,
        minutes: reader.read_u8(field::MINUTES)?,
        hours: reader.read_u8(field::HOURS)?,
        month_day: reader.read_u8(field::MONTH_DAY)?,
        month: reader.read_u8(field::MONTH)?,
        year: reader.read_u16(field::YEAR)?,
        weekday: reader.read_u8(field::WEEKDAY)?,
        daylight_saving: reader.read_u8(field::DST)? != 0,
    }))
}

pub fn decode_art_time_sync(payload: &[u8]) -> Option<ArtTimeSync> {
    discard_rejected(parse_art_time_sync(payload), "ArtTimeSync")
}

pub fn encode_art_time_sync(record: &ArtTimeSync) -> Vec<u8> {
    record.encode()
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::{
        ArtTimeSync, TimeSyncMode, decode_art_time_sync, encode_art_time_sync,
        parse_art_time_sync,
    };
    use crate::protocols::artnet::error::ArtNetError;
    use crate::protocols::artnet::layout::{self, time_sync as field};

    fn sample() -> ArtTimeSync {
        ArtTimeSync::from_datetime(datetime!(2024-03-10 07:08:09), TimeSyncMode::Set, true)
            .unwrap()
    }

    #[test]
    fn from_datetime_offsets_year_and_weekday() {
        let sync = sample();
        assert_eq!(sync.year, 124);
        assert_eq!(sync.calendar_year(), 2024);
        assert_eq!(sync.month, 3);
        assert_eq!(sync.month_day, 10);
        // 2024-03-10 was a Sunday.
        assert_eq!(sync.weekday, 0);
        assert_eq!((sync.hours, sync.minutes, sync.seconds), (7, 8, 9));
    }

    #[test]
    fn saturday_is_six() {
        let sync =
            ArtTimeSync::from_datetime(datetime!(2024-03-16 00:00), TimeSyncMode::Response, false)
                .unwrap();
        assert_eq!(sync.weekday, 6);
    }

    #[test]
    fn encode_layout() {
        let frame = encode_art_time_sync(&sample());
        assert_eq!(frame.len(), field::LEN);
        assert_eq!(&frame[..8], layout::ARTNET_ID);
        assert_eq!(&frame[8..10], &[0x00, 0x98]);
        assert_eq!(&frame[10..12], &[0x00, 14]);
        assert_eq!(&frame[12..14], &[0, 0]);
        assert_eq!(frame[field::PROG.offset], 1);
        assert_eq!(&frame[field::YEAR.range()], &[0x00, 124]);
        assert_eq!(frame[field::DST.offset], 1);
    }

    #[test]
    fn round_trip_preserves_all_fields() {
        for mode in [TimeSyncMode::Set, TimeSyncMode::Response] {
            let mut sync = sample();
            sync.mode = mode;
            let decoded = decode_art_time_sync(&sync.encode()).unwrap();
            assert_eq!(decoded, sync);
        }
    }

    #[test]
    fn rejects_years_before_1900() {
        let err =
            ArtTimeSync::from_datetime(datetime!(1899-12-31 23:59), TimeSyncMode::Set, false)
                .unwrap_err();
        assert_eq!(err, ArtNetError::YearOutOfRange { year: 1899 });
    }

    #[test]
    fn truncated_frame_is_an_error() {
        let frame = sample().encode();
        assert!(matches!(
            parse_art_time_sync(&frame[..field::LEN - 1]),
            Err(ArtNetError::TooShort { .. })
        ));
        assert!(decode_art_time_sync(&frame[..4]).is_none());
    }
}
