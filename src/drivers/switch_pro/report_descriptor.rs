pub const REPORT_DESCRIPTOR: [u8; 86] = [
    0x05, 0x01, // Usage Page (Generic Desktop)        0
    0x09, 0x05, // Usage (Game Pad)                    2
    0xa1, 0x01, // Collection (Application)            4
    0x15, 0x00, //  Logical Minimum (0)                6
    0x25, 0x01, //  Logical Maximum (1)                8
    0x35, 0x00, //  Physical Minimum (0)               10
    0x45, 0x01, //  Physical Maximum (1)               12
    0x75, 0x01, //  Report Size (1)                    14
    0x95, 0x10, //  Report Count (16)                  16
    0x05, 0x09, //  Usage Page (Button)                18
    0x19, 0x01, //  Usage Minimum (1)                  20
    0x29, 0x10, //  Usage Maximum (16)                 22
    0x81, 0x02, //  Input (Data,Var,Abs)               24
    0x05, 0x01, //  Usage Page (Generic Desktop)       26
    0x25, 0x07, //  Logical Maximum (7)                28
    0x46, 0x3b, 0x01, //  Physical Maximum (315)       30
    0x75, 0x04, //  Report Size (4)                    33
    0x95, 0x01, //  Report Count (1)                   35
    0x65, 0x14, //  Unit (EnglishRotation: deg)        37
    0x09, 0x39, //  Usage (Hat switch)                 39
    0x81, 0x42, //  Input (Data,Var,Abs,Null)          41
    0x65, 0x00, //  Unit (None)                        43
    0x95, 0x01, //  Report Count (1)                   45
    0x81, 0x01, //  Input (Const,Array,Abs)            47
    0x26, 0xff, 0x00, //  Logical Maximum (255)        49
    0x46, 0xff, 0x00, //  Physical Maximum (255)       52
    0x09, 0x30, //  Usage (X)                          55
    0x09, 0x31, //  Usage (Y)                          57
    0x09, 0x32, //  Usage (Z)                          59
    0x09, 0x35, //  Usage (Rz)                         61
    0x75, 0x08, //  Report Size (8)                    63
    0x95, 0x04, //  Report Count (4)                   65
    0x81, 0x02, //  Input (Data,Var,Abs)               67
    0x06, 0x00, 0xff, //  Usage Page (Vendor Defined)  69
    0x09, 0x20, //  Usage (Vendor Usage 0x20)          72
    0x95, 0x01, //  Report Count (1)                   74
    0x81, 0x02, //  Input (Data,Var,Abs)               76
    0x0a, 0x21, 0x26, //  Usage (Vendor Usage 0x2621)  78
    0x95, 0x08, //  Report Count (8)                   81
    0x91, 0x02, //  Output (Data,Var,Abs)              83
    0xc0, // End Collection                            85
];
