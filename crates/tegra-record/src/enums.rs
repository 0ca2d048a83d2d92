//! Named constants for enumerated register fields.

use crate::decode::EnumTable;

pub static COMPARISON_OP: EnumTable = EnumTable {
    name: "ComparisonOp",
    values: &[
        (0x200, "Never"),
        (0x201, "Less"),
        (0x202, "Equal"),
        (0x203, "LessEqual"),
        (0x204, "Greater"),
        (0x205, "NotEqual"),
        (0x206, "GreaterEqual"),
        (0x207, "Always"),
        // Old-style encodings accepted by the hardware.
        (1, "NeverOld"),
        (2, "LessOld"),
        (3, "EqualOld"),
        (4, "LessEqualOld"),
        (5, "GreaterOld"),
        (6, "NotEqualOld"),
        (7, "GreaterEqualOld"),
        (8, "AlwaysOld"),
    ],
};

pub static STENCIL_OP: EnumTable = EnumTable {
    name: "StencilOp",
    values: &[
        (1, "Keep"),
        (2, "Zero"),
        (3, "Replace"),
        (4, "Incr"),
        (5, "Decr"),
        (6, "Invert"),
        (7, "IncrWrap"),
        (8, "DecrWrap"),
        (0x1E00, "KeepOGL"),
        (0x0000, "ZeroOGL"),
        (0x1E01, "ReplaceOGL"),
        (0x1E02, "IncrOGL"),
        (0x1E03, "DecrOGL"),
        (0x150A, "InvertOGL"),
        (0x8507, "IncrWrapOGL"),
        (0x8508, "DecrWrapOGL"),
    ],
};

pub static BLEND_EQUATION: EnumTable = EnumTable {
    name: "BlendEquation",
    values: &[
        (1, "Add"),
        (2, "Subtract"),
        (3, "ReverseSubtract"),
        (4, "Min"),
        (5, "Max"),
        (0x8006, "AddGL"),
        (0x800A, "SubtractGL"),
        (0x800B, "ReverseSubtractGL"),
        (0x8007, "MinGL"),
        (0x8008, "MaxGL"),
    ],
};

pub static BLEND_FACTOR: EnumTable = EnumTable {
    name: "BlendFactor",
    values: &[
        (0x01, "Zero"),
        (0x02, "One"),
        (0x03, "SourceColor"),
        (0x04, "OneMinusSourceColor"),
        (0x05, "SourceAlpha"),
        (0x06, "OneMinusSourceAlpha"),
        (0x07, "DestAlpha"),
        (0x08, "OneMinusDestAlpha"),
        (0x09, "DestColor"),
        (0x0A, "OneMinusDestColor"),
        (0x0B, "SourceAlphaSaturate"),
        (0x10, "Source1Color"),
        (0x11, "OneMinusSource1Color"),
        (0x12, "Source1Alpha"),
        (0x13, "OneMinusSource1Alpha"),
        (0x61, "ConstantColor"),
        (0x62, "OneMinusConstantColor"),
        (0x63, "ConstantAlpha"),
        (0x64, "OneMinusConstantAlpha"),
        (0x4000, "ZeroGL"),
        (0x4001, "OneGL"),
        (0x4300, "SourceColorGL"),
        (0x4301, "OneMinusSourceColorGL"),
        (0x4302, "SourceAlphaGL"),
        (0x4303, "OneMinusSourceAlphaGL"),
        (0x4304, "DestAlphaGL"),
        (0x4305, "OneMinusDestAlphaGL"),
        (0x4306, "DestColorGL"),
        (0x4307, "OneMinusDestColorGL"),
        (0x4308, "SourceAlphaSaturateGL"),
    ],
};

pub static PRIMITIVE_TOPOLOGY: EnumTable = EnumTable {
    name: "PrimitiveTopology",
    values: &[
        (0x0, "Points"),
        (0x1, "Lines"),
        (0x2, "LineLoop"),
        (0x3, "LineStrip"),
        (0x4, "Triangles"),
        (0x5, "TriangleStrip"),
        (0x6, "TriangleFan"),
        (0x7, "Quads"),
        (0x8, "QuadStrip"),
        (0x9, "Polygon"),
        (0xA, "LinesAdjacency"),
        (0xB, "LineStripAdjacency"),
        (0xC, "TrianglesAdjacency"),
        (0xD, "TriangleStripAdjacency"),
        (0xE, "Patches"),
    ],
};

pub static INDEX_FORMAT: EnumTable = EnumTable {
    name: "IndexFormat",
    values: &[(0, "UnsignedByte"), (1, "UnsignedShort"), (2, "UnsignedInt")],
};

pub static CULL_FACE: EnumTable = EnumTable {
    name: "CullFace",
    values: &[(0x0404, "Front"), (0x0405, "Back"), (0x0408, "FrontAndBack")],
};

pub static FRONT_FACE: EnumTable = EnumTable {
    name: "FrontFace",
    values: &[(0x0900, "ClockWise"), (0x0901, "CounterClockWise")],
};

pub static POLYGON_MODE: EnumTable = EnumTable {
    name: "PolygonMode",
    values: &[(0x1B00, "Point"), (0x1B01, "Line"), (0x1B02, "Fill")],
};

pub static RENDER_TARGET_FORMAT: EnumTable = EnumTable {
    name: "RenderTargetFormat",
    values: &[
        (0x00, "None"),
        (0xC0, "R32G32B32A32_FLOAT"),
        (0xC1, "R32G32B32A32_SINT"),
        (0xC2, "R32G32B32A32_UINT"),
        (0xC3, "R32G32B32X32_FLOAT"),
        (0xC6, "R16G16B16A16_UNORM"),
        (0xC7, "R16G16B16A16_SNORM"),
        (0xC8, "R16G16B16A16_SINT"),
        (0xC9, "R16G16B16A16_UINT"),
        (0xCA, "R16G16B16A16_FLOAT"),
        (0xCB, "R32G32_FLOAT"),
        (0xCC, "R32G32_SINT"),
        (0xCD, "R32G32_UINT"),
        (0xCE, "R16G16B16X16_FLOAT"),
        (0xCF, "B8G8R8A8_UNORM"),
        (0xD0, "B8G8R8A8_SRGB"),
        (0xD1, "A2B10G10R10_UNORM"),
        (0xD2, "A2B10G10R10_UINT"),
        (0xD5, "A8B8G8R8_UNORM"),
        (0xD6, "A8B8G8R8_SRGB"),
        (0xD7, "A8B8G8R8_SNORM"),
        (0xD8, "A8B8G8R8_SINT"),
        (0xD9, "A8B8G8R8_UINT"),
        (0xDA, "R16G16_UNORM"),
        (0xDB, "R16G16_SNORM"),
        (0xDC, "R16G16_SINT"),
        (0xDD, "R16G16_UINT"),
        (0xDE, "R16G16_FLOAT"),
        (0xDF, "A2R10G10B10_UNORM"),
        (0xE0, "B10G11R11_FLOAT"),
        (0xE3, "R32_SINT"),
        (0xE4, "R32_UINT"),
        (0xE5, "R32_FLOAT"),
        (0xE8, "R5G6B5_UNORM"),
        (0xE9, "A1R5G5B5_UNORM"),
        (0xEA, "R8G8_UNORM"),
        (0xEB, "R8G8_SNORM"),
        (0xEC, "R8G8_SINT"),
        (0xED, "R8G8_UINT"),
        (0xEE, "R16_UNORM"),
        (0xEF, "R16_SNORM"),
        (0xF0, "R16_SINT"),
        (0xF1, "R16_UINT"),
        (0xF2, "R16_FLOAT"),
        (0xF3, "R8_UNORM"),
        (0xF4, "R8_SNORM"),
        (0xF5, "R8_SINT"),
        (0xF6, "R8_UINT"),
    ],
};

pub static DEPTH_FORMAT: EnumTable = EnumTable {
    name: "DepthFormat",
    values: &[
        (0x0A, "Z32_FLOAT"),
        (0x13, "Z16_UNORM"),
        (0x14, "S8_UINT_Z24_UNORM"),
        (0x15, "D24X8_UNORM"),
        (0x16, "D24S8_UNORM"),
        (0x17, "S8_UINT"),
        (0x18, "D24C8_UNORM"),
        (0x19, "D32_FLOAT_X24S8_UINT"),
    ],
};

pub static VERTEX_ATTRIBUTE_SIZE: EnumTable = EnumTable {
    name: "VertexAttributeSize",
    values: &[
        (0x01, "Size_32_32_32_32"),
        (0x02, "Size_32_32_32"),
        (0x03, "Size_16_16_16_16"),
        (0x04, "Size_32_32"),
        (0x05, "Size_16_16_16"),
        (0x0A, "Size_8_8_8_8"),
        (0x0F, "Size_16_16"),
        (0x12, "Size_32"),
        (0x13, "Size_8_8_8"),
        (0x18, "Size_8_8"),
        (0x1B, "Size_16"),
        (0x1D, "Size_8"),
        (0x30, "Size_10_10_10_2"),
        (0x31, "Size_11_11_10"),
    ],
};

pub static VERTEX_ATTRIBUTE_TYPE: EnumTable = EnumTable {
    name: "VertexAttributeType",
    values: &[
        (1, "SignedNorm"),
        (2, "UnsignedNorm"),
        (3, "SignedInt"),
        (4, "UnsignedInt"),
        (5, "UnsignedScaled"),
        (6, "SignedScaled"),
        (7, "Float"),
    ],
};

pub static SHADER_PROGRAM: EnumTable = EnumTable {
    name: "ShaderProgram",
    values: &[
        (0, "VertexA"),
        (1, "VertexB"),
        (2, "TesselationControl"),
        (3, "TesselationEval"),
        (4, "Geometry"),
        (5, "Fragment"),
    ],
};

pub static VIEWPORT_SWIZZLE: EnumTable = EnumTable {
    name: "ViewportSwizzle",
    values: &[
        (0, "PositiveX"),
        (1, "NegativeX"),
        (2, "PositiveY"),
        (3, "NegativeY"),
        (4, "PositiveZ"),
        (5, "NegativeZ"),
        (6, "PositiveW"),
        (7, "NegativeW"),
    ],
};

pub static QUERY_OPERATION: EnumTable = EnumTable {
    name: "QueryOperation",
    values: &[(0, "Release"), (1, "Acquire"), (2, "Counter"), (3, "Trap")],
};

pub static MEMORY_LAYOUT: EnumTable = EnumTable {
    name: "MemoryLayout",
    values: &[(0, "BlockLinear"), (1, "Pitch")],
};

pub static SURFACE_FORMAT: EnumTable = EnumTable {
    name: "SurfaceFormat",
    values: &[
        (0xC0, "R32G32B32A32_FLOAT"),
        (0xCA, "R16G16B16A16_FLOAT"),
        (0xCF, "B8G8R8A8_UNORM"),
        (0xD0, "B8G8R8A8_SRGB"),
        (0xD1, "A2B10G10R10_UNORM"),
        (0xD5, "A8B8G8R8_UNORM"),
        (0xD6, "A8B8G8R8_SRGB"),
        (0xE5, "R32_FLOAT"),
        (0xE8, "R5G6B5_UNORM"),
        (0xEA, "R8G8_UNORM"),
        (0xF2, "R16_FLOAT"),
        (0xF3, "R8_UNORM"),
    ],
};

pub static FERMI_OPERATION: EnumTable = EnumTable {
    name: "Operation",
    values: &[
        (0, "SrcCopyAnd"),
        (1, "ROPAnd"),
        (2, "Blend"),
        (3, "SrcCopy"),
        (4, "ROP"),
        (5, "SrcCopyPremult"),
        (6, "BlendPremult"),
    ],
};

pub static FERMI_FILTER: EnumTable = EnumTable {
    name: "Filter",
    values: &[(0, "Point"), (1, "Bilinear")],
};

pub static FERMI_ORIGIN: EnumTable = EnumTable {
    name: "Origin",
    values: &[(0, "Center"), (1, "Corner")],
};

pub static DMA_TRANSFER_TYPE: EnumTable = EnumTable {
    name: "DataTransferType",
    values: &[(0, "None"), (1, "Pipelined"), (2, "NonPipelined")],
};

pub static DMA_SEMAPHORE_TYPE: EnumTable = EnumTable {
    name: "SemaphoreType",
    values: &[
        (0, "None"),
        (1, "ReleaseOneWordSemaphore"),
        (2, "ReleaseFourWordSemaphore"),
    ],
};

pub static DMA_INTERRUPT_TYPE: EnumTable = EnumTable {
    name: "InterruptType",
    values: &[(0, "None"), (1, "Blocking"), (2, "NonBlocking")],
};

pub static DMA_SWIZZLE: EnumTable = EnumTable {
    name: "Swizzle",
    values: &[
        (0, "SrcX"),
        (1, "SrcY"),
        (2, "SrcZ"),
        (3, "SrcW"),
        (4, "ConstA"),
        (5, "ConstB"),
        (6, "NoWrite"),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    static ALL: &[&EnumTable] = &[
        &COMPARISON_OP,
        &STENCIL_OP,
        &BLEND_EQUATION,
        &BLEND_FACTOR,
        &PRIMITIVE_TOPOLOGY,
        &INDEX_FORMAT,
        &CULL_FACE,
        &FRONT_FACE,
        &POLYGON_MODE,
        &RENDER_TARGET_FORMAT,
        &DEPTH_FORMAT,
        &VERTEX_ATTRIBUTE_SIZE,
        &VERTEX_ATTRIBUTE_TYPE,
        &SHADER_PROGRAM,
        &VIEWPORT_SWIZZLE,
        &QUERY_OPERATION,
        &MEMORY_LAYOUT,
        &SURFACE_FORMAT,
        &FERMI_OPERATION,
        &FERMI_FILTER,
        &FERMI_ORIGIN,
        &DMA_TRANSFER_TYPE,
        &DMA_SEMAPHORE_TYPE,
        &DMA_INTERRUPT_TYPE,
        &DMA_SWIZZLE,
    ];

    #[test]
    fn values_are_unique_per_table() {
        for table in ALL {
            let mut seen = HashSet::new();
            for (value, name) in table.values {
                assert!(seen.insert(*value), "{}: duplicate value {value:#x} ({name})", table.name);
            }
        }
    }

    #[test]
    fn decode_rules_share_one_table_per_enum() {
        use crate::decode::{decode_table, Render};
        use crate::engine::EngineKind;

        let decoder = decode_table(EngineKind::Maxwell3d);
        let func = decoder.formats(0x4C3).unwrap();
        let alpha_func = decoder.formats(0x4C5).unwrap();
        for format in [func[0], alpha_func[0]] {
            let Render::Enum(table) = format.render else {
                panic!("expected an enum render, got {:?}", format.render);
            };
            assert!(std::ptr::eq(table, &COMPARISON_OP));
        }
    }

    #[test]
    fn lookup_misses_report_none() {
        assert_eq!(CULL_FACE.lookup(0x0405), Some("Back"));
        assert_eq!(CULL_FACE.lookup(0x0406), None);
    }
}
