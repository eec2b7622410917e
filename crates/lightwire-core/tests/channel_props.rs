use lightwire_core::protocols::artnet::{
    ArtTimeSync, TimeSyncMode, decode_art_time_sync, encode_art_time_sync,
};
use lightwire_core::protocols::channels::{
    ChannelBlock, build_channel_block, pack_for_transfer, parse_channel_blocks, plan_transfer,
};
use proptest::prelude::*;
use time::{Date, Month, PrimitiveDateTime, Time};

fn valid_block() -> impl Strategy<Value = (u16, Vec<u8>)> {
    (1u16..=512).prop_flat_map(|start| {
        let room = usize::from(512 - start + 1).min(127);
        (Just(start), prop::collection::vec(any::<u8>(), 1..=room))
    })
}

fn blocks(max_blocks: usize) -> impl Strategy<Value = Vec<ChannelBlock>> {
    prop::collection::vec(valid_block(), 0..max_blocks).prop_map(|specs| {
        specs
            .into_iter()
            .map(|(start, values)| {
                let end = start + values.len() as u16 - 1;
                ChannelBlock::new(start..=end, &values).unwrap()
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn valid_ranges_build_blocks((start, values) in valid_block()) {
        let end = start + values.len() as u16 - 1;
        let block = build_channel_block(start..=end, &values).unwrap();
        prop_assert_eq!(block.len(), 2 + values.len());
        prop_assert_eq!(block.channels(), start..=end);
        prop_assert_eq!(&block.as_bytes()[2..], values.as_slice());
    }

    #[test]
    fn mismatched_value_count_is_rejected(
        (start, values) in valid_block(),
        extra in 1usize..4,
    ) {
        let end = start + values.len() as u16 - 1;
        let mut longer = values.clone();
        longer.extend(std::iter::repeat_n(0u8, extra));
        prop_assert!(build_channel_block(start..=end, &longer).is_none());
        prop_assert!(build_channel_block(start..=end, &values[..values.len() - 1]).is_none());
    }

    #[test]
    fn ranges_past_512_are_rejected(start in 450u16..=512, len in 64usize..=127) {
        prop_assume!(usize::from(start) + len - 1 > 512);
        let end = start + len as u16 - 1;
        prop_assert!(build_channel_block(start..=end, &vec![0; len]).is_none());
    }

    #[test]
    fn long_ranges_are_rejected(start in 1u16..=300, len in 128usize..=212) {
        let end = start + len as u16 - 1;
        prop_assert!(build_channel_block(start..=end, &vec![0; len]).is_none());
    }

    #[test]
    fn packing_respects_mtu_and_order(blocks in blocks(12), mtu in 129usize..=512) {
        let writes = pack_for_transfer(&blocks, mtu);
        prop_assert!(writes.iter().all(|write| write.len() <= mtu));

        let sent: Vec<u8> = writes.concat();
        let expected: Vec<u8> = blocks.iter().flat_map(|b| b.as_bytes().to_vec()).collect();
        prop_assert_eq!(&sent, &expected);

        let received: Vec<ChannelBlock> = writes
            .iter()
            .map(|write| parse_channel_blocks(write).unwrap())
            .collect::<Vec<_>>()
            .concat();
        prop_assert_eq!(received, blocks);
    }

    #[test]
    fn oversized_blocks_never_reach_the_wire(blocks in blocks(8), mtu in 3usize..=128) {
        let plan = plan_transfer(&blocks, mtu);
        prop_assert!(plan.writes.iter().all(|write| write.len() <= mtu));
        let skipped = blocks.iter().filter(|b| b.len() > mtu).count();
        prop_assert_eq!(plan.oversized.len(), skipped);
        let kept: usize = blocks.iter().filter(|b| b.len() <= mtu).map(ChannelBlock::len).sum();
        prop_assert_eq!(plan.total_bytes(), kept);
    }

    #[test]
    fn split_covers_every_value(start in 1u16..=512, len in 0usize..=512) {
        let len = len.min(usize::from(512 - start + 1));
        let values: Vec<u8> = (0..len).map(|idx| idx as u8).collect();
        let blocks = ChannelBlock::split(start, &values).unwrap();
        prop_assert!(blocks.iter().all(|b| b.values().len() <= 127));
        let rejoined: Vec<u8> = blocks.iter().flat_map(|b| b.values().to_vec()).collect();
        prop_assert_eq!(rejoined, values);
    }

    #[test]
    fn time_sync_round_trips(
        year in 1900i32..=2200,
        month in 1u8..=12,
        day in 1u8..=28,
        hour in 0u8..24,
        minute in 0u8..60,
        second in 0u8..60,
        set in any::<bool>(),
        dst in any::<bool>(),
    ) {
        let month = Month::try_from(month).unwrap();
        let date = Date::from_calendar_date(year, month, day).unwrap();
        let time = Time::from_hms(hour, minute, second).unwrap();
        let mode = if set { TimeSyncMode::Set } else { TimeSyncMode::Response };
        let sync = ArtTimeSync::from_datetime(PrimitiveDateTime::new(date, time), mode, dst).unwrap();

        prop_assert!(sync.weekday <= 6);
        prop_assert_eq!(sync.calendar_year(), year);
        let decoded = decode_art_time_sync(&encode_art_time_sync(&sync)).unwrap();
        prop_assert_eq!(decoded, sync);
    }

    #[test]
    fn short_buffers_never_decode(bytes in prop::collection::vec(any::<u8>(), 0..10)) {
        prop_assert!(lightwire_core::protocols::artnet::decode_packet(&bytes).is_none());
        prop_assert!(lightwire_core::protocols::artnet::decode_art_dmx(&bytes).is_none());
        prop_assert!(lightwire_core::protocols::artnet::decode_art_poll_reply(&bytes).is_none());
        prop_assert!(decode_art_time_sync(&bytes).is_none());
    }
}
