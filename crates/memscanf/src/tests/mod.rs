mod snapshot_record;
